//! 依赖令牌
//!
//! 令牌是容器中查找提供者的键，可以是字符串、唯一符号或类型引用

use hexy_common::TypeInfo;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// 唯一符号
///
/// 每次调用 [`Symbol::new`] 都会得到一个与其他符号都不相等的新值，
/// 描述文本只用于展示。
#[derive(Clone)]
pub struct Symbol {
    id: Uuid,
    description: Arc<str>,
}

impl Symbol {
    /// 创建新符号
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
        }
    }

    /// 符号描述
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// 依赖令牌
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// 字符串令牌，按值比较
    Name(Arc<str>),
    /// 符号令牌，按身份比较
    Symbol(Symbol),
    /// 类型令牌，按 `TypeId` 比较
    Type(TypeInfo),
}

impl Token {
    /// 创建字符串令牌
    pub fn name(name: impl Into<Arc<str>>) -> Self {
        Self::Name(name.into())
    }

    /// 创建新的唯一符号令牌
    pub fn symbol(description: impl Into<Arc<str>>) -> Self {
        Self::Symbol(Symbol::new(description))
    }

    /// 创建类型令牌
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeInfo::of::<T>())
    }

    /// 如果是类型令牌，返回其类型信息
    pub fn type_info(&self) -> Option<&TypeInfo> {
        match self {
            Self::Type(info) => Some(info),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Symbol(symbol) => write!(f, "Symbol({})", symbol.description),
            Self::Type(info) => f.write_str(info.name),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "Token({name:?})"),
            Self::Symbol(symbol) => write!(f, "Token({symbol:?})"),
            Self::Type(info) => write!(f, "Token(<{}>)", info.name),
        }
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Self::name(name)
    }
}

impl From<Symbol> for Token {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Greeter;

    #[test]
    fn test_name_tokens_compare_by_value() {
        assert_eq!(Token::from("Name"), Token::name(String::from("Name")));
        assert_ne!(Token::from("Name"), Token::from("Other"));
    }

    #[test]
    fn test_symbols_compare_by_identity() {
        let first = Token::symbol("TaskRepository");
        let second = Token::symbol("TaskRepository");

        assert_ne!(first, second);
        assert_eq!(first, first.clone());
        assert_eq!(first.to_string(), "Symbol(TaskRepository)");
    }

    #[test]
    fn test_type_tokens() {
        let token = Token::of::<Greeter>();
        assert_eq!(token, Token::of::<Greeter>());
        assert_ne!(token, Token::of::<String>());
        assert_eq!(token.type_info().map(TypeInfo::short_name), Some("Greeter"));
        assert!(Token::from("Greeter").type_info().is_none());
    }

    #[test]
    fn test_tokens_as_hash_keys() {
        let symbol = Token::symbol("A");
        let mut set = HashSet::new();
        set.insert(Token::from("A"));
        set.insert(symbol.clone());
        set.insert(Token::of::<Greeter>());
        set.insert(Token::from("A"));

        assert_eq!(set.len(), 3);
        assert!(set.contains(&symbol));
    }
}
