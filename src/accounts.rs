use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;

/// 默认账号文件
pub const ACCOUNTS_PATH: &str = "data.txt";

const PREVIEW_CHARS: usize = 12;

/// 读取账号文件，每个非空行是一个 init_data。文件不存在时返回 `None`
pub fn load_accounts(path: &Path) -> Result<Option<Vec<String>>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("读取账号文件失败: {}", path.display()));
        }
    };

    Ok(Some(parse_accounts(&contents)))
}

pub fn parse_accounts(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// 日志中只显示凭证开头几个字符
pub fn mask_credential(init_data: &str) -> String {
    let preview: String = init_data.chars().take(PREVIEW_CHARS).collect();
    if preview.len() < init_data.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_and_padding_are_dropped() {
        let accounts = parse_accounts("  query_id=a  \n\n\t\nquery_id=b\r\n   \n");
        assert_eq!(accounts, vec!["query_id=a", "query_id=b"]);
    }

    #[test]
    fn missing_file_is_none() {
        let path = std::env::temp_dir().join(format!("kitty-claim-missing-{}.txt", std::process::id()));
        assert!(load_accounts(&path).unwrap().is_none());
    }

    #[test]
    fn accounts_keep_file_order() {
        let path = std::env::temp_dir().join(format!("kitty-claim-order-{}.txt", std::process::id()));
        std::fs::write(&path, "c\na\nb\n").unwrap();
        let accounts = load_accounts(&path).unwrap().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(accounts, vec!["c", "a", "b"]);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        assert!(load_accounts(&std::env::temp_dir()).is_err());
    }

    #[test]
    fn credentials_are_masked() {
        assert_eq!(mask_credential("short"), "short");
        assert_eq!(
            mask_credential("query_id=AAHdF6IQAAAAAN0XohDhrOrc"),
            "query_id=AAH..."
        );
    }
}
