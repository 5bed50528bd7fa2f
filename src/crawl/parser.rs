use clap::{App, Arg};
use std::ffi::OsString;

/// 命令行参数,保存用户输入的各个参数
pub struct CommandArgument {
    url: Option<String>,      //页面链接,同时也是下载链接的前缀
    out_path: Option<String>, //保存路径
}

/// 命令行定义
pub fn app() -> App<'static> {
    App::new("pdfcrawl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("download every pdf linked from a web page")
        .arg(
            Arg::new("url")
                .help("page to scan, also prefixed to every link")
                .value_name("URL")
                .allow_hyphen_values(true)
                .index(1),
        )
        .arg(
            Arg::new("folder")
                .help("folder to save the files in")
                .value_name("FOLDER")
                .allow_hyphen_values(true)
                .index(2),
        )
        .arg(
            Arg::new("rest")
                .index(3)
                .multiple_values(true)
                .allow_hyphen_values(true)
                .hide(true),
        )
}

impl CommandArgument {
    pub fn new() -> Self {
        Self {
            url: None,
            out_path: None,
        }
    }

    /// 解析命令行参数,如果缺少参数或者无法解析返回错误信息
    pub fn parse(&mut self) -> Result<(), &'static str> {
        self.parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(&mut self, args: I) -> Result<(), &'static str>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        // --help和--version直接退出,其余解析错误交给调用者打印用法
        let matcher = match app().try_get_matches_from(args) {
            Ok(matcher) => matcher,
            Err(err) if !err.use_stderr() => err.exit(),
            Err(_) => return Err("could not parse arguments"),
        };
        self.url = matcher.value_of("url").map(String::from);
        self.out_path = matcher.value_of("folder").map(String::from);
        if self.url.is_none() || self.out_path.is_none() {
            return Err("please input url and folder");
        }
        Ok(())
    }

    /// 获取url
    pub fn get_url(&self) -> Option<String> {
        self.url.clone()
    }

    /// 获取保存路径
    pub fn get_output_path(&self) -> Option<String> {
        self.out_path.clone()
    }
}

impl Default for CommandArgument {
    fn default() -> Self {
        Self::new()
    }
}
