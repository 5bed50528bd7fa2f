use std::path::{Component, Path, PathBuf};

/// 一个下载任务: 完整url, 保存目录, 文件名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    url: String,
    folder: PathBuf,
    file_name: String,
}

impl DownloadTarget {
    /// The url is `base_url` and `link` glued together as plain strings; a link
    /// that is already absolute still gets the prefix. The link also serves
    /// as the file name, untouched.
    pub fn new(base_url: &str, link: &str, folder: impl Into<PathBuf>) -> Self {
        Self {
            url: format!("{}{}", base_url, link),
            folder: folder.into(),
            file_name: link.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 保存路径
    pub fn path(&self) -> PathBuf {
        join(&self.folder, &self.file_name)
    }

    /// 文件名中的`..`是否会让文件落在目录之外
    pub fn escapes_folder(&self) -> bool {
        let mut depth: usize = 0;
        for component in Path::new(self.file_name.trim_start_matches('/')).components() {
            match component {
                Component::ParentDir => {
                    if depth == 0 {
                        return true;
                    }
                    depth -= 1;
                }
                Component::Normal(_) => depth += 1,
                _ => {}
            }
        }
        false
    }
}

/// 拼接保存路径
///
/// A leading `/` in `file_name` keeps the file inside `folder` instead of
/// replacing it. The result is cleaned lexically: `.` is dropped and `..`
/// removes the segment before it, so `sub/../a.pdf` needs no `sub` folder on
/// disk. `..` at the root is dropped; on a relative path it is kept.
pub fn join(folder: &Path, file_name: &str) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut depth: usize = 0; //可以被..抵消的目录层数
    let name = Path::new(file_name.trim_start_matches('/'));
    for component in folder.components().chain(name.components()) {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => {
                cleaned.push(part);
                depth += 1;
            }
            Component::ParentDir => {
                if depth > 0 {
                    cleaned.pop();
                    depth -= 1;
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::RootDir | Component::Prefix(_) => cleaned.push(component),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
