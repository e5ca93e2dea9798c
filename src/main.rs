//! # 对象图库客户端 — 命令行入口
//!
//! 本文件仅负责参数解析、服务地址解析与输出呈现。
//! 业务逻辑分布在各库模块中，详见 `lib.rs` 架构文档。

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use object_gallery::api::{ObjectRecord, ObjectsApi};
use object_gallery::compressor::{
    CompressionOptions, CompressionPreset, Compressor, EncodedImage, OutputFormat, SourceImage,
};
use object_gallery::error::AppError;
use object_gallery::uploader::UploadService;

#[derive(Parser)]
#[command(name = "object-gallery", version, about = "对象图库命令行客户端")]
struct Cli {
    /// 对象服务地址（缺省时读取 OBJECT_GALLERY_API_URL，再缺省用本地默认值）
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出全部对象
    List {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 查看单个对象详情
    Show {
        id: String,
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 删除对象
    Delete { id: String },
    /// 创建对象（按上传预算压缩图片后提交）
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// 图片文件路径
        #[arg(long)]
        image: PathBuf,
    },
    /// 本地压缩图片，输出 Data URL 或写入文件
    Compress {
        /// 来源文件路径
        input: PathBuf,
        /// 压缩预设（standard / upload）
        #[arg(long)]
        preset: Option<String>,
        /// 输出宽度上限（像素）
        #[arg(long)]
        max_width: Option<u32>,
        /// 输出高度上限（像素）
        #[arg(long)]
        max_height: Option<u32>,
        /// 首次编码质量（0.1 ~ 1.0）
        #[arg(long)]
        quality: Option<f32>,
        /// 体积预算（KB）
        #[arg(long)]
        max_size_kb: Option<u64>,
        /// 输出格式（jpeg / png / webp）
        #[arg(long)]
        format: Option<String>,
        /// 将编码字节写入文件（缺省打印 Data URL）
        #[arg(long)]
        output: Option<PathBuf>,
        /// 打印压缩报告
        #[arg(long)]
        report: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        log::error!("❌ {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::List { json } => {
            let api = resolve_api(cli.api_url)?;
            let records = api.list().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("暂无对象。");
            } else {
                for record in &records {
                    print_record(record);
                }
            }
        }
        Command::Show { id, json } => {
            let api = resolve_api(cli.api_url)?;
            let record = api.get(&id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
        }
        Command::Delete { id } => {
            let api = resolve_api(cli.api_url)?;
            api.delete(&id).await?;
            println!("🗑️ 已删除：{}", id);
        }
        Command::Create {
            title,
            description,
            image,
        } => {
            let api = resolve_api(cli.api_url)?;
            let service = UploadService::new(api)?;
            let record = service.create_object(&title, &description, &image).await?;
            println!("✅ 创建成功 - id: {}", record.id);
        }
        Command::Compress {
            input,
            preset,
            max_width,
            max_height,
            quality,
            max_size_kb,
            format,
            output,
            report,
        } => {
            let mut options = match preset {
                Some(preset) => CompressionOptions::preset(CompressionPreset::from_str(&preset)?),
                None => CompressionOptions::default(),
            };
            if let Some(max_width) = max_width {
                options.max_width = max_width;
            }
            if let Some(max_height) = max_height {
                options.max_height = max_height;
            }
            if let Some(quality) = quality {
                options.quality = quality;
            }
            if let Some(max_size_kb) = max_size_kb {
                options.max_size_kb = max_size_kb;
            }
            if let Some(format) = format {
                options.output_format = OutputFormat::from_str(&format)?;
            }

            let compressor = Compressor::new(options)?;
            let source = SourceImage::from_file(&input).await?;

            if report {
                let report = compressor.compress_with_report(&source).await?;
                println!("来源体积: {}KB", report.original_bytes / 1024);
                println!("结果体积: {}KB", report.result_bytes / 1024);
                println!("输出尺寸: {}x{}", report.width, report.height);
                println!("压缩率: {:.0}%", report.ratio * 100.0);
                println!("编码趟数: {}", report.encode_passes);
                if let Some(quality) = report.retry_quality {
                    println!("纠偏质量: {:.2}", quality);
                }
                deliver(&report.result, output.as_deref())?;
            } else {
                let encoded = compressor.compress(&source).await?;
                deliver(&encoded, output.as_deref())?;
            }
        }
    }

    Ok(())
}

/// 解析服务地址：显式参数 > 环境变量 > 本地默认值。
fn resolve_api(api_url: Option<String>) -> Result<ObjectsApi, AppError> {
    let api = match api_url {
        Some(url) => ObjectsApi::new(&url)?,
        None => ObjectsApi::from_env()?,
    };
    Ok(api)
}

/// 将结果写入文件或打印 Data URL。
fn deliver(encoded: &EncodedImage, output: Option<&Path>) -> Result<(), AppError> {
    match output {
        Some(path) => {
            std::fs::write(path, encoded.bytes())?;
            println!("已写入：{}（{}KB）", path.display(), encoded.len() / 1024);
        }
        None => println!("{}", encoded.to_data_url()),
    }
    Ok(())
}

fn print_record(record: &ObjectRecord) {
    println!("{}  {}", record.id, record.title);
    if !record.description.is_empty() {
        println!("    {}", record.description);
    }
    if let Some(url) = &record.image_url {
        println!("    图片: {}", url);
    }
    if let Some(created_at) = &record.created_at {
        println!("    创建于: {}", created_at);
    }
}
