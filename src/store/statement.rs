use std::borrow::Cow;

/// A value bound to a statement slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Integer(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<Option<String>> for Param {
    fn from(value: Option<String>) -> Self {
        value.map_or(Param::Null, Param::Text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: &'static str,
    pub value: Param,
}

/// SQL text plus its bound parameters.
///
/// Placeholders are SQLite numbered slots. The n-th binding fills `?n`, so
/// bindings must be pushed in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: Cow<'static, str>,
    bindings: Vec<Binding>,
}

impl Statement {
    pub fn new(sql: impl Into<Cow<'static, str>>) -> Self {
        Self { sql: sql.into(), bindings: Vec::new() }
    }

    pub fn bind(mut self, name: &'static str, value: impl Into<Param>) -> Self {
        self.bindings.push(Binding { name, value: value.into() });
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    #[cfg(test)]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.bindings.iter().find(|b| b.name == name).map(|b| &b.value)
    }

    pub fn param_names(&self) -> Vec<&'static str> {
        self.bindings.iter().map(|b| b.name).collect()
    }
}
