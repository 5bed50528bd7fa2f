use crate::crawl::error::CrawlError;
use crate::crawl::target;
use log::debug;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// 文件下载器,每次调用只发送一次请求,不重试
pub struct FileDownloader<'a> {
    client: &'a Client,
}

impl<'a> FileDownloader<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches `file_url` and streams the body into `folder/file_name`,
    /// creating `folder` and its parents first. Any existing file is
    /// truncated. If the copy fails midway the partial file stays on disk.
    pub fn download(
        &self,
        file_url: &str,
        folder: &Path,
        file_name: &str,
    ) -> Result<u64, CrawlError> {
        let mut response = self
            .client
            .get(file_url)
            .send()
            .map_err(|source| CrawlError::Request {
                url: file_url.to_string(),
                source,
            })?;
        debug!("GET {} -> {}", file_url, response.status());

        // 无论状态码如何都保存响应体
        fs::create_dir_all(folder).map_err(|source| CrawlError::CreateDir {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = target::join(folder, file_name);
        let mut file = File::create(&path).map_err(|source| CrawlError::CreateFile {
            path: path.clone(),
            source,
        })?;
        let written = io::copy(&mut response, &mut file).map_err(|source| CrawlError::Copy {
            url: file_url.to_string(),
            path: path.clone(),
            source,
        })?;
        debug!("wrote {} bytes to {}", written, path.display());
        Ok(written)
    }
}
