/// One named value of a [DxilEnum]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxilEnumValue {
    pub name: String,
    pub value: u32,
    pub doc: String,
    pub category: Option<String>,
}

/// An enumeration type shared between the compiler and the code generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxilEnum {
    pub name: String,
    pub doc: String,
    pub values: Vec<DxilEnumValue>,
    /// Never serialized, only used while generating code
    pub is_internal: bool,
}
impl DxilEnum {
    pub fn new(name: &str, doc: &str) -> Self {
        Self {
            name: name.to_owned(),
            doc: doc.to_owned(),
            values: vec![],
            is_internal: false,
        }
    }

    /// Build from `(value, name, doc)` triples
    pub fn with_values(name: &str, doc: &str, values: &[(u32, &str, &str)]) -> Self {
        let mut e = Self::new(name, doc);
        for &(value, value_name, value_doc) in values {
            e.push(value_name, value, value_doc);
        }
        e
    }

    pub fn push(&mut self, name: &str, value: u32, doc: &str) {
        self.values.push(DxilEnumValue {
            name: name.to_owned(),
            value,
            doc: doc.to_owned(),
            category: None,
        });
    }

    pub fn value_names(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&DxilEnumValue> {
        self.values.iter().find(|v| v.name == name)
    }
}
