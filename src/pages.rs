use std::collections::{HashMap, HashSet};

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::model::{
    Alias, Class, ClassLike, Function, Interface, Library, Namespace, Node, Owner, Property,
    Record, Signal, TypeEntry,
};
use crate::render::Language;

/// Identifier of the root namespace page.
pub const ROOT_PAGE_ID: &str = "index";

/// Qualified name of the well-known root type. Parent chains stop here and
/// hierarchies never display it.
pub const ROOT_TYPE: &str = "Core.Object";

/// Upper bound on parent-chain walks. The model is acyclic by contract; a
/// chain this deep means the contract was broken upstream.
pub const MAX_CHAIN_DEPTH: usize = 64;

pub type PageId = usize;

/// The entity a page documents.
#[derive(Debug, Clone, Copy)]
pub enum PageNode<'a> {
    Namespace(&'a Namespace),
    Class(&'a Class),
    Record(&'a Record),
    Interface(&'a Interface),
    Alias(&'a Alias),
    Function {
        func: &'a Function,
        role: FunctionRole,
        owner: Option<Owner<'a>>,
    },
    Property {
        prop: &'a Property,
        owner: Owner<'a>,
    },
    Signal {
        signal: &'a Signal,
        owner: Owner<'a>,
    },
}

impl<'a> PageNode<'a> {
    pub fn doc(&self) -> Option<&'a str> {
        match *self {
            PageNode::Namespace(ns) => ns.doc.as_deref(),
            PageNode::Class(c) => c.doc.as_deref(),
            PageNode::Record(r) => r.doc.as_deref(),
            PageNode::Interface(i) => i.doc.as_deref(),
            PageNode::Alias(a) => a.doc.as_deref(),
            PageNode::Function { func, .. } => func.doc.as_deref(),
            PageNode::Property { prop, .. } => prop.doc.as_deref(),
            PageNode::Signal { signal, .. } => signal.doc.as_deref(),
        }
    }

    /// The class or interface behind this page, when it has one.
    pub fn class_like(&self) -> Option<ClassLike<'a>> {
        match *self {
            PageNode::Class(c) => Some(ClassLike::Class(c)),
            PageNode::Interface(i) => Some(ClassLike::Interface(i)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionRole {
    Function,
    Constructor,
    Method,
}

impl FunctionRole {
    pub fn style(&self) -> &'static str {
        match self {
            FunctionRole::Function => "function",
            FunctionRole::Constructor => "constructor",
            FunctionRole::Method => "method",
        }
    }
}

/// An outbound typed link recorded on a page during construction.
#[derive(Debug, Clone)]
pub struct Link {
    pub kind: &'static str,
    pub target: String,
    pub group: Option<&'static str>,
}

/// One documentable output unit.
#[derive(Debug)]
pub struct Page<'a> {
    pub id: String,
    pub node: PageNode<'a>,
    pub parent: Option<PageId>,
    pub children: Vec<PageId>,
    pub page_type: &'static str,
    pub style: &'static str,
    pub title: String,
    pub links: Vec<Link>,
}

/// The completed page tree plus the cross-reference table. Immutable once
/// built; both writers render from the same graph.
#[derive(Debug)]
pub struct PageGraph<'a> {
    pages: Vec<Page<'a>>,
    xref: HashMap<String, String>,
    by_type: HashMap<String, PageId>,
}

impl<'a> PageGraph<'a> {
    pub fn build(library: &'a Library, language: Language) -> Self {
        Builder::new(library, language).build()
    }

    pub fn root(&self) -> &Page<'a> {
        &self.pages[0]
    }

    pub fn page(&self, id: PageId) -> &Page<'a> {
        &self.pages[id]
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page<'a>> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Resolve an inline marker token to a page identifier. A miss is not an
    /// error; callers fall back to the literal token.
    pub fn lookup_xref(&self, token: &str) -> Option<&str> {
        self.xref.get(token).map(String::as_str)
    }

    /// The page documenting a type, keyed by its qualified `Ns.Name`.
    pub fn type_page(&self, namespace: &str, name: &str) -> Option<&Page<'a>> {
        self.by_type
            .get(&format!("{namespace}.{name}"))
            .map(|&id| &self.pages[id])
    }
}

struct Builder<'a> {
    library: &'a Library,
    language: Language,
    pages: Vec<Page<'a>>,
    xref: HashMap<String, String>,
    by_type: HashMap<String, PageId>,
    seen_ids: HashSet<String>,
}

impl<'a> Builder<'a> {
    fn new(library: &'a Library, language: Language) -> Self {
        Self {
            library,
            language,
            pages: Vec::new(),
            xref: HashMap::new(),
            by_type: HashMap::new(),
            seen_ids: HashSet::new(),
        }
    }

    fn build(mut self) -> PageGraph<'a> {
        let ns = self.library.namespace();
        let root = self.add_page(
            None,
            ROOT_PAGE_ID.to_string(),
            PageNode::Namespace(ns),
            "guide",
            "namespace",
        );
        self.xref.insert(ns.name.clone(), ROOT_PAGE_ID.to_string());

        for node in &ns.nodes {
            match node {
                Node::Class(c) => {
                    let page = self.add_page(
                        Some(root),
                        format!("{}.{}", ns.name, c.name),
                        PageNode::Class(c),
                        "guide",
                        "class",
                    );
                    self.add_link(page, "guide", ROOT_PAGE_ID.to_string(), Some("class"));
                    self.register_type(&ns.name, &c.name, c.type_name.as_deref(), &c.c_name, page);
                    let owner = Owner::Class(c);
                    self.add_functions(page, owner, &c.constructors, FunctionRole::Constructor);
                    self.add_functions(page, owner, &c.methods, FunctionRole::Method);
                    self.add_properties(page, owner, &c.properties);
                    self.add_signals(page, owner, &c.signals);
                }
                Node::Record(r) => {
                    let page = self.add_page(
                        Some(root),
                        format!("{}.{}", ns.name, r.name),
                        PageNode::Record(r),
                        "guide",
                        "record",
                    );
                    self.add_link(page, "guide", ROOT_PAGE_ID.to_string(), None);
                    self.register_type(&ns.name, &r.name, r.type_name.as_deref(), &r.c_name, page);
                    let owner = Owner::Record(r);
                    self.add_functions(page, owner, &r.constructors, FunctionRole::Constructor);
                    self.add_functions(page, owner, &r.methods, FunctionRole::Method);
                }
                Node::Interface(i) => {
                    let page = self.add_page(
                        Some(root),
                        format!("{}.{}", ns.name, i.name),
                        PageNode::Interface(i),
                        "guide",
                        "interface",
                    );
                    self.add_link(page, "guide", ROOT_PAGE_ID.to_string(), None);
                    self.register_type(&ns.name, &i.name, i.type_name.as_deref(), &i.c_name, page);
                    let owner = Owner::Interface(i);
                    self.add_functions(page, owner, &i.methods, FunctionRole::Method);
                    self.add_properties(page, owner, &i.properties);
                    self.add_signals(page, owner, &i.signals);
                }
                Node::Alias(a) => {
                    let page = self.add_page(
                        Some(root),
                        format!("{}.{}", ns.name, a.name),
                        PageNode::Alias(a),
                        "topic",
                        "alias",
                    );
                    let id = self.pages[page].id.clone();
                    self.xref.insert(a.c_name.clone(), id);
                }
                Node::Function(f) => {
                    let page = self.add_page(
                        Some(root),
                        format!("{}.{}", ns.name, f.name),
                        PageNode::Function {
                            func: f,
                            role: FunctionRole::Function,
                            owner: None,
                        },
                        "topic",
                        "function",
                    );
                    self.add_link(page, "guide", ROOT_PAGE_ID.to_string(), Some("function"));
                    let id = self.pages[page].id.clone();
                    self.xref.insert(f.symbol.clone(), id);
                }
            }
        }

        PageGraph {
            pages: self.pages,
            xref: self.xref,
            by_type: self.by_type,
        }
    }

    fn add_functions(
        &mut self,
        parent: PageId,
        owner: Owner<'a>,
        functions: &'a [Function],
        role: FunctionRole,
    ) {
        let ns = &self.library.namespace().name;
        for func in functions {
            let page = self.add_page(
                Some(parent),
                format!("{ns}.{}.{}", owner.name(), func.name),
                PageNode::Function {
                    func,
                    role,
                    owner: Some(owner),
                },
                "topic",
                role.style(),
            );
            let parent_id = self.pages[parent].id.clone();
            self.add_link(page, "guide", parent_id, Some(role.style()));
            let id = self.pages[page].id.clone();
            self.xref.insert(func.symbol.clone(), id);
        }
    }

    fn add_properties(&mut self, parent: PageId, owner: Owner<'a>, properties: &'a [Property]) {
        let ns = &self.library.namespace().name;
        for prop in properties {
            if prop.ty.is_unknown() {
                warn!(
                    property = %prop.name,
                    owner = %owner.c_name(),
                    "ignoring property: type could not be resolved"
                );
                continue;
            }
            let page = self.add_page(
                Some(parent),
                format!("{ns}.{}-{}", owner.name(), prop.name),
                PageNode::Property { prop, owner },
                "topic",
                "property",
            );
            let parent_id = self.pages[parent].id.clone();
            self.add_link(page, "guide", parent_id, Some("property"));
            let id = self.pages[page].id.clone();
            self.xref.insert(format!("{}:{}", owner.c_name(), prop.name), id);
        }
    }

    fn add_signals(&mut self, parent: PageId, owner: Owner<'a>, signals: &'a [Signal]) {
        let ns = &self.library.namespace().name;
        for signal in signals {
            let page = self.add_page(
                Some(parent),
                format!("{ns}.{}--{}", owner.name(), signal.name),
                PageNode::Signal { signal, owner },
                "topic",
                "signal",
            );
            let parent_id = self.pages[parent].id.clone();
            self.add_link(page, "guide", parent_id, Some("signal"));
            let id = self.pages[page].id.clone();
            self.xref.insert(format!("{}::{}", owner.c_name(), signal.name), id);
        }
    }

    fn add_page(
        &mut self,
        parent: Option<PageId>,
        id: String,
        node: PageNode<'a>,
        page_type: &'static str,
        style: &'static str,
    ) -> PageId {
        // Identifier collisions mean the model producer emitted duplicate
        // names; that is a contract breach, not something to route around.
        assert!(
            self.seen_ids.insert(id.clone()),
            "duplicate page identifier {id:?} (malformed interface model)"
        );

        let title = self
            .language
            .title(&self.library.namespace().name, &node);
        let page_id = self.pages.len();
        self.pages.push(Page {
            id,
            node,
            parent,
            children: Vec::new(),
            page_type,
            style,
            title,
            links: Vec::new(),
        });
        if let Some(parent) = parent {
            self.pages[parent].children.push(page_id);
        }
        page_id
    }

    fn add_link(&mut self, page: PageId, kind: &'static str, target: String, group: Option<&'static str>) {
        self.pages[page].links.push(Link { kind, target, group });
    }

    fn register_type(
        &mut self,
        namespace: &str,
        name: &str,
        type_name: Option<&str>,
        c_name: &str,
        page: PageId,
    ) {
        let id = self.pages[page].id.clone();
        let key = type_name.unwrap_or(c_name);
        self.xref.insert(key.to_string(), id);
        self.by_type.insert(format!("{namespace}.{name}"), page);
    }
}

/// Proper ancestors of a class or interface, most distant first, stopping
/// short of (and excluding) the well-known root type. A class with no
/// declared parent yields an empty chain.
pub fn parent_chain<'a>(library: &'a Library, node: ClassLike<'a>) -> Result<Vec<TypeEntry<'a>>> {
    let mut chain = Vec::new();
    let mut parent = node.parent();
    while let Some(name) = parent {
        if name == ROOT_TYPE {
            break;
        }
        if chain.len() >= MAX_CHAIN_DEPTH {
            bail!(
                "inheritance chain of {} exceeds {MAX_CHAIN_DEPTH} levels; \
                 the interface model likely contains a parent cycle",
                node.c_name()
            );
        }
        let entry = library.lookup_class_like(name).with_context(|| {
            format!(
                "parent type {name} of {} is not part of the loaded namespaces",
                node.c_name()
            )
        })?;
        parent = entry.node.parent();
        chain.push(entry);
    }
    chain.reverse();
    Ok(chain)
}
