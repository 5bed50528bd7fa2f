use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 抓取过程中可能出现的错误
///
/// Every variant keeps the URL or path it was working on, so the printed
/// message says where the run went wrong and not only what failed.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// http客户端无法初始化
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not create folder {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 写入中断时文件已经部分写入磁盘,不会被删除
    #[error("could not write {} from {url}: {source}", .path.display())]
    Copy {
        url: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CrawlError {
    /// 错误是否来自网络
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            CrawlError::Client(_) | CrawlError::Request { .. } | CrawlError::Body { .. }
        )
    }
}
