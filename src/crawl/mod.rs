use crate::crawl::downloader::FileDownloader;
use crate::crawl::error::CrawlError;
use crate::crawl::links::LinkExtractor;
use crate::crawl::parser::CommandArgument;
use crate::crawl::target::DownloadTarget;
use colorful::{Color, Colorful};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use std::ffi::OsString;
use std::time::Duration;

pub mod downloader;
pub mod error;
pub mod links;
pub mod parser;
pub mod target;
#[cfg(test)]
mod test_server;

/// 创建http客户端,不设置超时
pub fn client() -> Result<Client, CrawlError> {
    Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(CrawlError::Client)
}

/// 一次运行的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub links: usize,
    pub downloaded: usize,
    pub failed: usize,
}

/// 页面抓取器: 提取页面上的pdf链接并逐个下载
pub struct Crawler {
    url: String,         //页面链接
    output_path: String, //保存路径
    client: Client,      //客户端
}

impl Crawler {
    pub fn new() -> Result<Self, CrawlError> {
        Ok(Self::with_client(client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            url: String::new(),
            output_path: String::from("."),
            client,
        }
    }

    /// 设置页面链接
    pub fn set_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    /// 设置保存路径
    pub fn set_output_path(mut self, output_path: String) -> Self {
        self.output_path = output_path;
        self
    }

    /// Extracts the links once, then downloads them one after another.
    /// Only a failed extraction is returned as an error; a failed download
    /// is printed and the loop moves on to the next link.
    pub fn run(&self) -> Result<RunReport, CrawlError> {
        let links = LinkExtractor::new(&self.client).extract(&self.url)?;
        let downloader = FileDownloader::new(&self.client);
        let mut report = RunReport {
            links: links.len(),
            ..RunReport::default()
        };

        for link in &links {
            let target = DownloadTarget::new(&self.url, link, &self.output_path);
            debug!("{} -> {}", target.url(), target.path().display());
            if target.escapes_folder() {
                warn!(
                    "{} points outside {}",
                    target.file_name(),
                    target.folder().display()
                );
            }

            println!("Downloading {}...", target.file_name());
            match downloader.download(target.url(), target.folder(), target.file_name()) {
                Ok(_) => {
                    report.downloaded += 1;
                    let message = format!("Downloaded {} successfully!", target.file_name());
                    println!("{}", message.color(Color::Green));
                }
                Err(err) => {
                    report.failed += 1;
                    let message = format!("Error downloading file: {}", err);
                    println!("{}", message.color(Color::Red));
                }
            }
        }

        info!(
            "{} of {} files downloaded from {}",
            report.downloaded, report.links, self.url
        );
        Ok(report)
    }
}

/// 命令行入口。参数不足或者提取失败时只打印信息,不返回错误
pub fn execute() -> anyhow::Result<()> {
    //初始化日志
    pretty_env_logger::init_timed();
    execute_from(std::env::args_os())
}

/// Same as `execute` with explicit arguments and without touching the logger.
pub fn execute_from<I, T>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = CommandArgument::new();
    let (url, output_path) = match (
        command.parse_from(args),
        command.get_url(),
        command.get_output_path(),
    ) {
        (Ok(()), Some(url), Some(output_path)) => (url, output_path),
        _ => {
            parser::app().print_help()?;
            println!();
            return Ok(());
        }
    };

    let crawler = Crawler::new()?.set_url(url).set_output_path(output_path);
    if let Err(err) = crawler.run() {
        let message = format!("Error extracting links: {}", err);
        println!("{}", message.color(Color::Red));
    }
    Ok(())
}
