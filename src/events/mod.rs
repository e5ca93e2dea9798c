//! # 实时事件模块（events）
//!
//! ## 设计思路
//!
//! 实时通道本身是外部协作方，本模块只拥有两样东西：
//! 事件契约（事件名 + 负载结构）与本地列表的更新规则。
//! 传输层（连接、重连、订阅管理）不在本模块职责内。
//!
//! ## 实现思路
//!
//! - 事件以（事件名, JSON 负载）形式进入，解码为 `GalleryEvent`。
//! - `apply_event` 把事件按到达顺序合并进本地列表：
//!   新建对象插入列表头部，删除事件按 id 移除。

use serde::Deserialize;

use crate::api::ObjectRecord;

/// 对象创建事件名，负载为完整对象记录。
pub const OBJECT_CREATED_EVENT: &str = "objectCreated";

/// 对象删除事件名，负载为 `{id}`。
pub const OBJECT_DELETED_EVENT: &str = "objectDeleted";

/// 事件解码错误。
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// 事件名不在契约内。
    #[error("未知事件：{0}")]
    UnknownEvent(String),

    /// 负载结构与契约不符。
    #[error("事件负载解析失败：{0}")]
    Payload(String),
}

#[derive(Debug, Deserialize)]
struct DeletedPayload {
    id: String,
}

/// 实时通道推送的图库事件。
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    /// 新对象已创建。
    ObjectCreated(ObjectRecord),
    /// 对象已删除。
    ObjectDeleted { id: String },
}

impl GalleryEvent {
    /// 从（事件名, JSON 负载）解码事件。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use object_gallery::events::{GalleryEvent, OBJECT_DELETED_EVENT};
    ///
    /// let payload = serde_json::json!({"id": "66f0a1"});
    /// let event = GalleryEvent::from_named_payload(OBJECT_DELETED_EVENT, &payload)?;
    /// # Ok::<(), object_gallery::events::EventError>(())
    /// ```
    pub fn from_named_payload(
        event: &str,
        payload: &serde_json::Value,
    ) -> Result<Self, EventError> {
        match event {
            OBJECT_CREATED_EVENT => {
                let record: ObjectRecord = serde_json::from_value(payload.clone())
                    .map_err(|e| EventError::Payload(format!("对象创建负载非法：{}", e)))?;
                Ok(Self::ObjectCreated(record))
            }
            OBJECT_DELETED_EVENT => {
                let deleted: DeletedPayload = serde_json::from_value(payload.clone())
                    .map_err(|e| EventError::Payload(format!("对象删除负载非法：{}", e)))?;
                Ok(Self::ObjectDeleted { id: deleted.id })
            }
            other => Err(EventError::UnknownEvent(other.to_string())),
        }
    }

    /// 事件对应的通道事件名。
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::ObjectCreated(_) => OBJECT_CREATED_EVENT,
            Self::ObjectDeleted { .. } => OBJECT_DELETED_EVENT,
        }
    }
}

/// 将事件合并进本地对象列表。
///
/// 新建对象插入头部（最新优先），删除事件按 id 过滤；
/// 删除一个不在列表中的 id 是无害空操作。
pub fn apply_event(objects: &mut Vec<ObjectRecord>, event: GalleryEvent) {
    match event {
        GalleryEvent::ObjectCreated(record) => objects.insert(0, record),
        GalleryEvent::ObjectDeleted { id } => objects.retain(|object| object.id != id),
    }
}
