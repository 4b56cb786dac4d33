/// SQL helper functions / SQL 工具函数

/// Escape character used with `LIKE ... ESCAPE` / LIKE 转义字符
pub const LIKE_ESCAPE: char = '\\';

/// Check if name is a plain SQL identifier / 判断是否为合法的 SQL 标识符
/// Table names cannot be bound as parameters, so only `[A-Za-z_][A-Za-z0-9_]*`
/// is ever spliced into query text / 表名无法参数绑定
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Build a LIKE pattern matching `needle` anywhere / 构建子串匹配的 LIKE 模式
/// `%`, `_` and the escape character itself match literally / 通配符按字面匹配
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
