//! # 线上数据模型
//!
//! ## 设计思路
//!
//! 模型字段与服务端 JSON 命名保持一一对应（`_id` / camelCase），
//! 通过 serde 重命名隔离 Rust 侧命名习惯，调用方不感知线上命名细节。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 图库对象记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// 服务端分配的对象标识。
    #[serde(rename = "_id")]
    pub id: String,
    /// 标题。
    pub title: String,
    /// 描述。
    pub description: String,
    /// 服务端存储后的图片地址（可能缺省）。
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// 创建时间（可能缺省）。
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// 创建对象的请求体。
///
/// `image_base64` 为压缩后的 Data URL，直接嵌入 JSON。
#[derive(Debug, Clone, Serialize)]
pub struct CreateObjectRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "imageBase64")]
    pub image_base64: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_wire_names() {
        let json = r#"{
            "_id": "66f0a1",
            "title": "Vase",
            "description": "Bleu",
            "imageUrl": "http://example.com/vase.jpg",
            "createdAt": "2026-01-02T03:04:05.000Z"
        }"#;

        let record: ObjectRecord =
            serde_json::from_str(json).expect("wire record should deserialize");

        assert_eq!(record.id, "66f0a1");
        assert_eq!(record.title, "Vase");
        assert_eq!(
            record.image_url.as_deref(),
            Some("http://example.com/vase.jpg")
        );
        assert!(record.created_at.is_some());
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let json = r#"{"_id": "1", "title": "t", "description": "d"}"#;

        let record: ObjectRecord =
            serde_json::from_str(json).expect("minimal record should deserialize");

        assert!(record.image_url.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn create_request_serializes_camel_case_image_field() {
        let request = CreateObjectRequest {
            title: "t".to_string(),
            description: "d".to_string(),
            image_base64: "data:image/jpeg;base64,AAAA".to_string(),
        };

        let json = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(json["title"], "t");
        assert_eq!(json["imageBase64"], "data:image/jpeg;base64,AAAA");
        assert!(json.get("image_base64").is_none());
    }
}
