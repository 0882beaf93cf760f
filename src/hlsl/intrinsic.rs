use std::collections::HashMap;

use tracing::{debug, info};

use super::error::{IntrinsicError, IntrinsicErrorContext};
use super::grammar::{
    classify_line, fold_template_commas, parse_attributes, split_params, DefLine, RawDeclaration,
};
use super::params::{resolve_signature, ParamRef, ParameterDescriptor, Shape};

/// Namespace whose intrinsics get the `IOP_` enum prefix; all others get `MOP_`
pub const INTRINSICS_NAMESPACE: &str = "Intrinsics";

/// One callable built-in operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrinsicRecord {
    pub name: String,
    /// Sequence number, unique within the namespace
    pub ordinal: usize,
    /// Operand-style name, defaults to `name`
    pub opname: String,
    /// Return value at position 0, then the arguments in declared order
    pub params: Vec<ParameterDescriptor>,
    pub namespace: String,
    pub namespace_ordinal: usize,
    pub doc: String,
    pub readonly: bool,
    pub readnone: bool,
    /// Enum name of the unsigned variant of this operation
    pub unsigned_op: Option<String>,
    /// Position of the parameter which determines the overload type, if one was named
    pub overload_param: Option<usize>,
}
impl IntrinsicRecord {
    /// Ordering key: namespace, name, parameter count, sequence number
    pub fn sort_key(&self) -> (usize, &str, usize, usize) {
        (
            self.namespace_ordinal,
            self.name.as_str(),
            self.params.len(),
            self.ordinal,
        )
    }

    pub fn enum_name(&self) -> String {
        format!("{}_{}", enum_prefix(&self.namespace), self.name)
    }

    pub fn return_param(&self) -> &ParameterDescriptor {
        &self.params[0]
    }

    pub fn args(&self) -> &[ParameterDescriptor] {
        &self.params[1..]
    }

    /// The shape of the parameter at `position` after following its template back-reference.
    ///
    /// A return value taking its type from the caller mirrors the overload parameter,
    /// or the first argument when the overload is picked by the return value.
    pub fn effective_shape(&self, position: usize) -> Option<Shape> {
        let param = self.params.get(position)?;
        match param.template_id {
            ParamRef::Index(idx) if idx != position && idx < self.params.len() => {
                self.effective_shape(idx)
            }
            ParamRef::FromReturnType if position == 0 && self.params.len() > 1 => {
                let mirror = match self.overload_param {
                    Some(idx) if idx > 0 => idx,
                    _ => 1,
                };
                self.effective_shape(mirror)
            }
            _ => Some(param.shape()),
        }
    }
}

fn enum_prefix(namespace: &str) -> &'static str {
    if namespace == INTRINSICS_NAMESPACE {
        "IOP"
    } else {
        "MOP"
    }
}

/// A named group of intrinsics, as indices into [IntrinsicDb] records in sort-key order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub ordinal: usize,
    members: Vec<usize>,
}
impl Namespace {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A [Namespace] paired with the records it indexes
#[derive(Debug, Clone, Copy)]
pub struct NamespaceView<'a> {
    pub namespace: &'a Namespace,
    records: &'a [IntrinsicRecord],
}
impl<'a> NamespaceView<'a> {
    pub fn name(&self) -> &'a str {
        &self.namespace.name
    }

    pub fn intrinsics(&self) -> impl Iterator<Item = &'a IntrinsicRecord> + 'a {
        let (namespace, records) = (self.namespace, self.records);
        namespace.members.iter().map(move |&i| &records[i])
    }
}

/// Every intrinsic declared in a definition file.
///
/// Records are kept in declaration order, namespaces are derived by sorting on [IntrinsicRecord::sort_key].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrinsicDb {
    records: Vec<IntrinsicRecord>,
    namespaces: Vec<Namespace>,
}
impl IntrinsicDb {
    /// Parse a whole definition file
    pub fn parse(text: &str) -> Result<Self, IntrinsicErrorContext> {
        let mut builder = IntrinsicDbBuilder::new();
        let mut last_line = (0, "");
        for (i, line) in text.lines().enumerate() {
            last_line = (i + 1, line);
            builder
                .push_line(line)
                .map_err(|err| IntrinsicErrorContext::new(i + 1, line, err))?;
        }
        builder
            .finish()
            .map_err(|err| IntrinsicErrorContext::new(last_line.0, last_line.1, err))
    }

    /// Records in declaration order
    pub fn records(&self) -> &[IntrinsicRecord] {
        &self.records
    }

    pub fn namespaces(&self) -> impl Iterator<Item = NamespaceView<'_>> {
        self.namespaces.iter().map(move |namespace| NamespaceView {
            namespace,
            records: &self.records,
        })
    }

    pub fn namespace(&self, name: &str) -> Option<NamespaceView<'_>> {
        self.namespaces().find(|ns| ns.name() == name)
    }

    /// All records with this name, in sort-key order
    pub fn lookup<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a IntrinsicRecord> + 'a {
        self.namespaces()
            .flat_map(|ns| ns.intrinsics())
            .filter(move |r| r.name == name)
    }

    /// Parameters of the first record with this name, in sort-key order
    pub fn parameters(&self, name: &str) -> Option<&[ParameterDescriptor]> {
        self.namespaces()
            .flat_map(|ns| ns.intrinsics())
            .find(|r| r.name == name)
            .map(|r| r.params.as_slice())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Accumulates records line by line
#[derive(Debug, Default)]
pub struct IntrinsicDbBuilder {
    records: Vec<IntrinsicRecord>,
    current_namespace: Option<String>,
    namespace_ordinals: HashMap<String, usize>,
    namespace_counts: HashMap<String, usize>,
}
impl IntrinsicDbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) -> Result<(), IntrinsicError> {
        match classify_line(line)? {
            DefLine::Blank | DefLine::Comment => Ok(()),
            DefLine::NamespaceOpen(name) => {
                if self.current_namespace.is_some() {
                    return Err(IntrinsicError::UnbalancedNamespace(
                        "cannot open namespace without closing prior one",
                    ));
                }
                let next_ordinal = self.namespace_ordinals.len() + 1;
                let ordinal = *self
                    .namespace_ordinals
                    .entry(name.to_owned())
                    .or_insert(next_ordinal);
                debug!(namespace = name, ordinal, "opened namespace");
                self.current_namespace = Some(name.to_owned());
                Ok(())
            }
            DefLine::NamespaceClose => match self.current_namespace.take() {
                Some(_) => Ok(()),
                None => Err(IntrinsicError::UnbalancedNamespace(
                    "cannot close namespace without previously opening it",
                )),
            },
            DefLine::Intrinsic(decl) => {
                let record = self.build_record(&decl, line)?;
                debug!(
                    namespace = %record.namespace,
                    name = %record.name,
                    ordinal = record.ordinal,
                    "added intrinsic"
                );
                self.records.push(record);
                Ok(())
            }
        }
    }

    fn build_record(
        &mut self,
        decl: &RawDeclaration,
        line: &str,
    ) -> Result<IntrinsicRecord, IntrinsicError> {
        let namespace = self
            .current_namespace
            .clone()
            .ok_or_else(|| IntrinsicError::MissingNamespace(line.to_owned()))?;
        let attrs = parse_attributes(decl.attrs)?;

        let return_desc = format!("out {} {}", fold_template_commas(decl.return_text), decl.name);
        let params = fold_template_commas(decl.params);
        let params = resolve_signature(&return_desc, &split_params(&params))?;

        if let Some(idx) = attrs.overload_param.filter(|&idx| idx >= params.len()) {
            return Err(IntrinsicError::InvalidAttribute(format!("overload={}", idx)));
        }

        let count = self.namespace_counts.entry(namespace.clone()).or_insert(0);
        let ordinal = *count;
        *count += 1;

        Ok(IntrinsicRecord {
            name: decl.name.to_owned(),
            ordinal,
            opname: decl.operand.unwrap_or(decl.name).to_owned(),
            params,
            namespace_ordinal: self.namespace_ordinals[&namespace],
            doc: format!("pending doc for {}", decl.name),
            readonly: attrs.readonly,
            readnone: attrs.readnone,
            unsigned_op: attrs
                .unsigned_op
                .map(|op| format!("{}_{}", enum_prefix(&namespace), op)),
            overload_param: attrs.overload_param,
            namespace,
        })
    }

    /// Check the namespaces are closed and group the records
    pub fn finish(self) -> Result<IntrinsicDb, IntrinsicError> {
        if self.current_namespace.is_some() {
            return Err(IntrinsicError::UnbalancedNamespace(
                "namespace still open at end of input",
            ));
        }

        let mut order: Vec<usize> = (0..self.records.len()).collect();
        order.sort_by(|&a, &b| self.records[a].sort_key().cmp(&self.records[b].sort_key()));

        let mut namespaces: Vec<Namespace> = vec![];
        for idx in order {
            let record = &self.records[idx];
            match namespaces.last_mut() {
                Some(ns) if ns.name == record.namespace => ns.members.push(idx),
                _ => namespaces.push(Namespace {
                    name: record.namespace.clone(),
                    ordinal: record.namespace_ordinal,
                    members: vec![idx],
                }),
            }
        }

        info!(
            intrinsics = self.records.len(),
            namespaces = namespaces.len(),
            "loaded intrinsic definitions"
        );

        Ok(IntrinsicDb {
            records: self.records,
            namespaces,
        })
    }
}
