use crate::crawl::error::CrawlError;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use log::{debug, warn};
use reqwest::blocking::Client;

/// 需要提取的链接后缀,区分大小写
pub const PDF_SUFFIX: &str = ".pdf";

/// 一次扫描的结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Scan {
    /// 按文档顺序排列的href,保留重复项
    pub links: Vec<String>,
    /// 分词器遇到并已恢复的标记错误数量
    pub markup_errors: usize,
}

/// 分词器的接收端,只关心a标签
///
/// The tokenizer drops a repeated attribute before the tag reaches the sink,
/// so only the first `href` of a tag is seen; the drop shows up as a markup
/// error.
#[derive(Default)]
struct AnchorSink {
    scan: Scan,
}

impl AnchorSink {
    fn collect(&mut self, tag: &Tag) {
        if &*tag.name != "a" {
            return;
        }
        for attr in &tag.attrs {
            if &*attr.name.local == "href" && attr.value.ends_with(PDF_SUFFIX) {
                self.scan.links.push(attr.value.to_string());
            }
        }
    }
}

/// Elements whose content is text, not markup. Without a tree builder the
/// tokenizer has to be told to switch state after their start tag.
fn raw_kind(name: &str) -> Option<TokenSinkResult<()>> {
    let kind = match name {
        "title" | "textarea" => RawKind::Rcdata,
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => RawKind::Rawtext,
        "script" => RawKind::ScriptData,
        "plaintext" => return Some(TokenSinkResult::Plaintext),
        _ => return None,
    };
    Some(TokenSinkResult::RawData(kind))
}

impl TokenSink for AnchorSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => {
                self.collect(&tag);
                if !tag.self_closing {
                    if let Some(result) = raw_kind(&tag.name) {
                        return result;
                    }
                }
            }
            Token::ParseError(reason) => {
                debug!("markup error on line {}: {}", line_number, reason);
                self.scan.markup_errors += 1;
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// 扫描一段html,返回所有以.pdf结尾的a标签href
pub fn scan(markup: &str) -> Scan {
    let mut tokenizer = Tokenizer::new(AnchorSink::default(), TokenizerOpts::default());
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(markup));
    // the sink never asks for a script pause, so one feed drains the queue
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();
    tokenizer.sink.scan
}

/// 链接提取器:请求页面并提取pdf链接
pub struct LinkExtractor<'a> {
    client: &'a Client,
}

impl<'a> LinkExtractor<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches `page_url` once and returns the `.pdf` hrefs it links to.
    /// The HTTP status is not checked; an error page is scanned like any other.
    pub fn extract(&self, page_url: &str) -> Result<Vec<String>, CrawlError> {
        let response = self
            .client
            .get(page_url)
            .send()
            .map_err(|source| CrawlError::Request {
                url: page_url.to_string(),
                source,
            })?;
        debug!("GET {} -> {}", page_url, response.status());
        // 按Content-Type中的charset解码,没有charset时按utf-8,非法字节替换为U+FFFD
        let markup = response.text().map_err(|source| CrawlError::Body {
            url: page_url.to_string(),
            source,
        })?;

        let scan = scan(&markup);
        if scan.markup_errors > 0 {
            warn!(
                "{} markup errors recovered while scanning {}; links after them were still collected",
                scan.markup_errors, page_url
            );
        }
        debug!("found {} pdf links on {}", scan.links.len(), page_url);
        Ok(scan.links)
    }
}
