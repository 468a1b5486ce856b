use serde::Deserialize;

// The interface model: an already-validated, read-only tree describing one
// namespace of a typed library. Deserialized once, never mutated afterwards.

#[derive(Debug, Deserialize)]
pub struct Document {
    pub namespace: Namespace,
    /// Names of dependency namespaces whose types may be referenced here.
    #[serde(default)]
    pub includes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    /// Top-level nodes in declaration order. Order is preserved everywhere
    /// downstream; nothing re-sorts it.
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Node {
    Class(Class),
    Record(Record),
    Interface(Interface),
    Alias(Alias),
    Function(Function),
}

#[derive(Debug, Default, Deserialize)]
pub struct Class {
    pub name: String,
    pub c_name: String,
    /// Registered runtime type name, when the type system knows this class.
    #[serde(default)]
    pub type_name: Option<String>,
    /// Qualified `Ns.Name` of the declared parent type, if any.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub constructors: Vec<Function>,
    #[serde(default)]
    pub methods: Vec<Function>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub signals: Vec<Signal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Record {
    pub name: String,
    pub c_name: String,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub constructors: Vec<Function>,
    #[serde(default)]
    pub methods: Vec<Function>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Interface {
    pub name: String,
    pub c_name: String,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub methods: Vec<Function>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub signals: Vec<Signal>,
}

#[derive(Debug, Deserialize)]
pub struct Alias {
    pub name: String,
    pub c_name: String,
    pub target: TypeRef,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Function {
    pub name: String,
    /// The C-style callable symbol, e.g. `demo_widget_show`.
    pub symbol: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub retval: ReturnValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(rename = "type", default)]
    pub ty: TypeRef,
    #[serde(default)]
    pub transfer: Transfer,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReturnValue {
    #[serde(rename = "type", default)]
    pub ty: TypeRef,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub transfer: Transfer,
    #[serde(default)]
    pub nullable: bool,
}

impl Default for ReturnValue {
    fn default() -> Self {
        // An absent return value means the callable returns nothing.
        Self {
            ty: TypeRef::Plain {
                name: "none".to_string(),
                c_name: Some("void".to_string()),
            },
            doc: None,
            transfer: Transfer::None,
            nullable: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transfer {
    #[default]
    None,
    Container,
    Full,
}

impl Transfer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transfer::None => "none",
            Transfer::Container => "container",
            Transfer::Full => "full",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(rename = "type", default)]
    pub ty: TypeRef,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub construct: bool,
    #[serde(default)]
    pub construct_only: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct Signal {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub retval: ReturnValue,
    #[serde(default)]
    pub when: SignalWhen,
    #[serde(default)]
    pub no_recurse: bool,
    #[serde(default)]
    pub detailed: bool,
    #[serde(default)]
    pub action: bool,
    #[serde(default)]
    pub no_hooks: bool,
}

/// Emission timing of a signal relative to the default handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalWhen {
    First,
    #[default]
    Last,
    Cleanup,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeRef {
    Plain {
        name: String,
        #[serde(default)]
        c_name: Option<String>,
    },
    /// `container` names the array type (`Array`, `ByteArray`, ...); a bare
    /// element means a fixed C-style array.
    Array {
        element: Box<TypeRef>,
        #[serde(default)]
        container: Option<String>,
    },
    List {
        element: Box<TypeRef>,
    },
    Map {
        key: Box<TypeRef>,
        value: Box<TypeRef>,
    },
    Varargs,
    Unknown,
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Unknown
    }
}

impl TypeRef {
    /// The C name a link can point at, with any pointer markers stripped.
    pub fn link_target(&self) -> Option<String> {
        match self {
            TypeRef::Plain { c_name: Some(c), .. } => Some(c.replace('*', "")),
            _ => None,
        }
    }

    pub fn c_name(&self) -> Option<&str> {
        match self {
            TypeRef::Plain { c_name, .. } => c_name.as_deref(),
            _ => None,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeRef::Plain { c_name: Some(c), .. } if c.contains('*'))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeRef::Unknown)
    }
}

/// Class-like nodes that can sit in an inheritance chain.
#[derive(Debug, Clone, Copy)]
pub enum ClassLike<'a> {
    Class(&'a Class),
    Interface(&'a Interface),
}

impl<'a> ClassLike<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            ClassLike::Class(c) => &c.name,
            ClassLike::Interface(i) => &i.name,
        }
    }

    pub fn c_name(&self) -> &'a str {
        match *self {
            ClassLike::Class(c) => &c.c_name,
            ClassLike::Interface(i) => &i.c_name,
        }
    }

    pub fn type_name(&self) -> Option<&'a str> {
        match *self {
            ClassLike::Class(c) => c.type_name.as_deref(),
            ClassLike::Interface(i) => i.type_name.as_deref(),
        }
    }

    pub fn parent(&self) -> Option<&'a str> {
        match *self {
            ClassLike::Class(c) => c.parent.as_deref(),
            ClassLike::Interface(i) => i.parent.as_deref(),
        }
    }

    /// Display name used in hierarchy diagrams: the registered type name
    /// when present, the C name otherwise.
    pub fn display_name(&self) -> &'a str {
        self.type_name().unwrap_or_else(|| self.c_name())
    }
}

/// Nodes that own methods, properties or signals.
#[derive(Debug, Clone, Copy)]
pub enum Owner<'a> {
    Class(&'a Class),
    Record(&'a Record),
    Interface(&'a Interface),
}

impl<'a> Owner<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Owner::Class(c) => &c.name,
            Owner::Record(r) => &r.name,
            Owner::Interface(i) => &i.name,
        }
    }

    pub fn c_name(&self) -> &'a str {
        match *self {
            Owner::Class(c) => &c.c_name,
            Owner::Record(r) => &r.c_name,
            Owner::Interface(i) => &i.c_name,
        }
    }
}
