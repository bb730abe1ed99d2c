//! Generated documentation for a single source file.

use serde::{Deserialize, Serialize};

/// A class (or struct/type) found in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDoc {
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub base_classes: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub methods: Vec<String>,
}

impl ClassDoc {
    /// `Name : Base1, Base2`, or just the name without bases.
    pub fn signature(&self) -> String {
        if self.base_classes.is_empty() {
            self.name.clone()
        } else {
            format!("{} : {}", self.name, self.base_classes.join(", "))
        }
    }
}

/// A free function found in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionDoc {
    pub name: String,
    /// Parameter list as rendered by the backend, e.g. `(a, b=1)`.
    pub params: Option<String>,
    pub description: Option<String>,
}

impl FunctionDoc {
    pub fn signature(&self) -> String {
        format!("{}{}", self.name, self.params.as_deref().unwrap_or(""))
    }
}

/// Response of `GET /api/repo/{id}/file/{path}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDoc {
    pub description: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub imports: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub classes: Vec<ClassDoc>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub functions: Vec<FunctionDoc>,
    pub dot_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses() {
        let doc: FileDoc = serde_json::from_str("{}").unwrap();
        assert!(doc.description.is_none());
        assert!(doc.imports.is_empty());
        assert!(doc.classes.is_empty());
        assert!(doc.functions.is_empty());
        assert!(doc.dot_code.is_none());
    }

    #[test]
    fn signatures() {
        let class = ClassDoc {
            name: "Parser".into(),
            base_classes: vec!["Base".into(), "Mixin".into()],
            methods: vec![],
        };
        assert_eq!(class.signature(), "Parser : Base, Mixin");

        let bare = ClassDoc {
            name: "Token".into(),
            ..Default::default()
        };
        assert_eq!(bare.signature(), "Token");

        let func = FunctionDoc {
            name: "parse".into(),
            params: Some("(src, strict=False)".into()),
            description: None,
        };
        assert_eq!(func.signature(), "parse(src, strict=False)");
    }
}
