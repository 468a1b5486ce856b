use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::markup::MarkupWriter;
use crate::model::{Alias, Function, Library, Owner, Property, Signal};
use crate::pages::{Page, PageGraph, PageNode};
use crate::render::format::Formatter;
use crate::render::inline::{segments, Segment};
use crate::render::Language;

const XMLNS: &str = "http://docbook.org/ns/docbook";
const XMLVERSION: &str = "5.0";
const DOCTYPE: &str = r#"<!DOCTYPE book PUBLIC "-//OASIS//DTD DocBook XML V4.1.2//EN"
               "http://www.oasis-open.org/docbook/xml/4.1.2/docbookx.dtd" [
<!ENTITY % local.common.attrib "xmlns:xi  CDATA  #FIXED 'http://www.w3.org/2003/XInclude'">
<!ENTITY version SYSTEM "version.xml">
]>
"#;

/// Single-document writer: one DocBook book with a chapter per top-level
/// entity and per-member detail sections.
pub struct DocBookWriter {
    language: Language,
}

impl DocBookWriter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn write(&self, library: &Library, output: &Path) -> Result<()> {
        let graph = PageGraph::build(library, self.language);
        let text = self.render(library, &graph)?;
        fs::write(output, text)
            .with_context(|| format!("writing docbook output {}", output.display()))
    }

    /// Render the whole book to a string. Split from [`DocBookWriter::write`]
    /// so tests can inspect output without touching the filesystem.
    pub fn render(&self, library: &Library, graph: &PageGraph<'_>) -> Result<String> {
        let formatter = Formatter::new(library);
        let ns = library.namespace();

        let mut w = MarkupWriter::new();
        w.raw(DOCTYPE);
        let book_id = format!("page_{}", ns.name);
        w.element(
            "book",
            &[("xml:id", book_id.as_str()), ("xmlns", XMLNS), ("version", XMLVERSION)],
            |w| {
                w.tag("title", &[], &format!("{} Documentation", ns.name))?;
                for &child in &graph.root().children {
                    self.render_chapter(w, graph, &formatter, &ns.name, graph.page(child))?;
                }
                Ok(())
            },
        )?;
        w.into_string()
    }

    fn render_chapter(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        namespace: &str,
        page: &Page<'_>,
    ) -> Result<()> {
        let name = page_name(page);
        let chapter_id = format!("ch_{name}");
        w.element("chapter", &[("xml:id", chapter_id.as_str())], |w| {
            w.tag("title", &[], &page.title)?;
            self.render_synopsis(w, graph, formatter, namespace, page, name)?;
            self.render_hierarchy(w, formatter, page, name)?;
            self.render_member_summaries(w, graph, formatter, page, name)?;
            self.render_description(w, graph, page, name)?;
            self.render_details(w, graph, formatter, page)?;
            self.render_member_details(w, graph, formatter, page, name)?;
            Ok(())
        })
    }

    fn render_synopsis(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        namespace: &str,
        page: &Page<'_>,
        name: &str,
    ) -> Result<()> {
        let div_id = format!("{name}.synopsis");
        w.element(
            "refsynopsisdiv",
            &[("id", div_id.as_str()), ("role", "synopsis")],
            |w| {
                w.tag("title", &[("role", "synopsis.title")], "Synopsis")?;
                if !matches!(page.node, PageNode::Alias(_)) {
                    w.empty("anchor", &[("id", name)])?;
                }
                w.element("synopsis", &[], |w| {
                    if let Some(line) = self.language.synopsis_line(namespace, &page.node) {
                        w.text(&format!("{line}\n"))?;
                    }
                    match page.node {
                        PageNode::Function { func, owner, .. } => {
                            formatter.render_method(w, func, owner, true)?;
                        }
                        _ => {
                            for (func, owner) in callable_children(graph, page) {
                                formatter.render_method(w, func, Some(owner), true)?;
                            }
                        }
                    }
                    Ok(())
                })
            },
        )
    }

    fn render_hierarchy(
        &self,
        w: &mut MarkupWriter,
        formatter: &Formatter<'_>,
        page: &Page<'_>,
        name: &str,
    ) -> Result<()> {
        let Some(class_like) = page.node.class_like() else {
            return Ok(());
        };
        let lines = formatter.hierarchy_lines(class_like)?;
        let sect_id = format!("{name}.object-hierarchy");
        w.element(
            "refsect1",
            &[("id", sect_id.as_str()), ("role", "object_hierarchy")],
            |w| {
                w.tag(
                    "title",
                    &[("role", "object_hierarchy.title")],
                    "Object Hierarchy",
                )?;
                w.element("synopsis", &[], |w| {
                    w.text(&lines.join("\n"))
                })
            },
        )
    }

    fn render_member_summaries(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        page: &Page<'_>,
        name: &str,
    ) -> Result<()> {
        let properties = property_children(graph, page);
        if !properties.is_empty() {
            let sect_id = format!("{name}.properties");
            w.element(
                "refsect1",
                &[("id", sect_id.as_str()), ("role", "properties")],
                |w| {
                    w.tag("title", &[("role", "properties.title")], "Properties")?;
                    w.element("synopsis", &[], |w| {
                        for (prop, _) in &properties {
                            formatter.render_property_line(w, prop)?;
                        }
                        Ok(())
                    })
                },
            )?;
        }

        let signals = signal_children(graph, page);
        if !signals.is_empty() {
            let sect_id = format!("{name}.signals");
            w.element(
                "refsect1",
                &[("id", sect_id.as_str()), ("role", "signal_proto")],
                |w| {
                    w.tag("title", &[("role", "signal_proto.title")], "Signals")?;
                    w.element("synopsis", &[], |w| {
                        for (signal, _, _) in &signals {
                            formatter.render_signal_line(w, signal)?;
                        }
                        Ok(())
                    })
                },
            )?;
        }
        Ok(())
    }

    fn render_description(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        page: &Page<'_>,
        name: &str,
    ) -> Result<()> {
        let Some(doc) = page.node.doc() else {
            return Ok(());
        };
        let sect_id = format!("{name}.description");
        w.element("refsect1", &[("id", sect_id.as_str())], |w| {
            w.tag("title", &[("role", "desc.title")], "Description")?;
            render_doc(w, graph, doc)
        })
    }

    fn render_details(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        page: &Page<'_>,
    ) -> Result<()> {
        let sect_id = match page.node {
            PageNode::Function { func, .. } => format!("{}.details", func.symbol),
            _ => format!("{}-details", details_base(page).to_lowercase()),
        };
        w.element(
            "refsect1",
            &[("id", sect_id.as_str()), ("role", "details")],
            |w| {
                w.tag("title", &[("role", "details.title")], "Details")?;
                match page.node {
                    PageNode::Alias(alias) => self.render_alias_detail(w, formatter, alias)?,
                    PageNode::Function { func, owner, .. } => {
                        self.render_method_detail(w, graph, formatter, func, owner)?;
                    }
                    _ => {
                        self.render_struct_detail(w, page)?;
                        for (func, owner) in callable_children(graph, page) {
                            self.render_method_detail(w, graph, formatter, func, Some(owner))?;
                        }
                    }
                }
                Ok(())
            },
        )
    }

    fn render_struct_detail(&self, w: &mut MarkupWriter, page: &Page<'_>) -> Result<()> {
        let (name, c_name) = match page.node {
            PageNode::Class(c) => (c.name.as_str(), c.c_name.as_str()),
            PageNode::Record(r) => (r.name.as_str(), r.c_name.as_str()),
            PageNode::Interface(i) => (i.name.as_str(), i.c_name.as_str()),
            _ => return Ok(()),
        };
        let sect_id = format!("{c_name}-struct");
        w.element(
            "refsect2",
            &[("id", sect_id.as_str()), ("role", "struct")],
            |w| {
                w.tag("title", &[], &format!("struct {c_name}"))?;
                w.element("indexterm", &[("zone", sect_id.as_str())], |w| {
                    w.tag("primary", &[("sortas", name)], c_name)
                })?;
                w.tag("programlisting", &[], &format!("struct {c_name};"))
            },
        )
    }

    fn render_alias_detail(
        &self,
        w: &mut MarkupWriter,
        formatter: &Formatter<'_>,
        alias: &Alias,
    ) -> Result<()> {
        let target = alias
            .target
            .c_name()
            .map(str::to_string)
            .unwrap_or_else(|| formatter.type_display(&alias.target));
        w.element(
            "refsect2",
            &[("id", alias.c_name.as_str()), ("role", "typedef")],
            |w| {
                w.tag("title", &[], &alias.c_name)?;
                w.element("indexterm", &[("zone", alias.c_name.as_str())], |w| {
                    w.tag("primary", &[("sortas", alias.name.as_str())], &alias.c_name)
                })?;
                w.tag(
                    "programlisting",
                    &[],
                    &format!("typedef {target} {}", alias.c_name),
                )?;
                if let Some(doc) = &alias.doc {
                    w.tag("para", &[], doc)?;
                }
                Ok(())
            },
        )
    }

    fn render_method_detail(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        func: &Function,
        owner: Option<Owner<'_>>,
    ) -> Result<()> {
        let anchor = func.symbol.replace('_', "-");
        w.element(
            "refsect2",
            &[("id", anchor.as_str()), ("role", "function")],
            |w| {
                w.tag("title", &[], &format!("{} ()", func.symbol))?;
                w.element("indexterm", &[("zone", anchor.as_str())], |w| {
                    // Anchors mangle underscores; the index keeps the symbol.
                    w.tag("primary", &[], &func.symbol)
                })?;
                w.element("programlisting", &[], |w| {
                    formatter.render_method(w, func, owner, false)
                })?;
                if let Some(doc) = &func.doc {
                    render_doc(w, graph, doc)?;
                }
                w.element("variablelist", &[("role", "params")], |w| {
                    formatter.render_param_list(w, func, owner)
                })
            },
        )
    }

    fn render_member_details(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        page: &Page<'_>,
        name: &str,
    ) -> Result<()> {
        let properties = property_children(graph, page);
        if !properties.is_empty() {
            let sect_id = format!("{name}.property-details");
            w.element(
                "refsect1",
                &[("id", sect_id.as_str()), ("role", "property_details")],
                |w| {
                    w.tag(
                        "title",
                        &[("role", "property_details.title")],
                        "Property Details",
                    )?;
                    for (prop, member) in &properties {
                        self.render_property_detail(w, graph, formatter, prop, member)?;
                    }
                    Ok(())
                },
            )?;
        }

        let signals = signal_children(graph, page);
        if !signals.is_empty() {
            let sect_id = format!("{name}.signal-details");
            w.element(
                "refsect1",
                &[("id", sect_id.as_str()), ("role", "signals")],
                |w| {
                    w.tag("title", &[("role", "signal.title")], "Signal Details")?;
                    for (signal, owner, member) in &signals {
                        self.render_signal_detail(w, graph, formatter, signal, *owner, member)?;
                    }
                    Ok(())
                },
            )?;
        }
        Ok(())
    }

    fn render_property_detail(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        prop: &Property,
        member: &Page<'_>,
    ) -> Result<()> {
        w.element(
            "refsect2",
            &[("id", member.id.as_str()), ("role", "property")],
            |w| {
                w.tag("title", &[], &member.title)?;
                w.element("indexterm", &[("zone", member.id.as_str())], |w| {
                    w.tag("primary", &[], &prop.name)
                })?;
                w.element("programlisting", &[], |w| {
                    formatter.render_property_line(w, prop)
                })?;
                if let Some(doc) = &prop.doc {
                    render_doc(w, graph, doc)?;
                }
                Ok(())
            },
        )
    }

    fn render_signal_detail(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        formatter: &Formatter<'_>,
        signal: &Signal,
        owner: Owner<'_>,
        member: &Page<'_>,
    ) -> Result<()> {
        w.element(
            "refsect2",
            &[("id", member.id.as_str()), ("role", "signal")],
            |w| {
                w.tag("title", &[], &member.title)?;
                w.element("indexterm", &[("zone", member.id.as_str())], |w| {
                    w.tag("primary", &[], &signal.name)
                })?;
                w.element("programlisting", &[], |w| {
                    formatter.render_signal_line(w, signal)
                })?;
                if let Some(doc) = &signal.doc {
                    render_doc(w, graph, doc)?;
                }
                w.element("variablelist", &[("role", "params")], |w| {
                    formatter.render_signal_params(w, signal, owner)
                })
            },
        )
    }
}

/// The lexical name docbook anchors hang off: the registered type name when
/// the node has one, the C name otherwise, the symbol for functions.
fn page_name<'a>(page: &'a Page<'_>) -> &'a str {
    match page.node {
        PageNode::Namespace(ns) => &ns.name,
        PageNode::Class(c) => c.type_name.as_deref().unwrap_or(&c.c_name),
        PageNode::Record(r) => r.type_name.as_deref().unwrap_or(&r.c_name),
        PageNode::Interface(i) => i.type_name.as_deref().unwrap_or(&i.c_name),
        PageNode::Alias(a) => &a.c_name,
        PageNode::Function { func, .. } => &func.symbol,
        PageNode::Property { prop, .. } => &prop.name,
        PageNode::Signal { signal, .. } => &signal.name,
    }
}

fn details_base<'a>(page: &'a Page<'_>) -> &'a str {
    match page.node {
        PageNode::Class(c) => &c.c_name,
        PageNode::Record(r) => &r.c_name,
        PageNode::Interface(i) => &i.c_name,
        PageNode::Alias(a) => &a.c_name,
        _ => page.id.as_str(),
    }
}

fn callable_children<'a>(
    graph: &PageGraph<'a>,
    page: &Page<'a>,
) -> Vec<(&'a Function, Owner<'a>)> {
    page.children
        .iter()
        .filter_map(|&child| match graph.page(child).node {
            PageNode::Function {
                func,
                owner: Some(owner),
                ..
            } => Some((func, owner)),
            _ => None,
        })
        .collect()
}

fn property_children<'g, 'a>(
    graph: &'g PageGraph<'a>,
    page: &Page<'a>,
) -> Vec<(&'a Property, &'g Page<'a>)> {
    page.children
        .iter()
        .filter_map(|&child| {
            let member = graph.page(child);
            match member.node {
                PageNode::Property { prop, .. } => Some((prop, member)),
                _ => None,
            }
        })
        .collect()
}

fn signal_children<'g, 'a>(
    graph: &'g PageGraph<'a>,
    page: &Page<'a>,
) -> Vec<(&'a Signal, Owner<'a>, &'g Page<'a>)> {
    page.children
        .iter()
        .filter_map(|&child| {
            let member = graph.page(child);
            match member.node {
                PageNode::Signal { signal, owner } => Some((signal, owner, member)),
                _ => None,
            }
        })
        .collect()
}

/// Documentation prose for the single-document output: one `para` per
/// blank-line-separated paragraph. Markers render as their literal token;
/// only the multi-page output turns them into links.
pub(crate) fn render_doc(w: &mut MarkupWriter, graph: &PageGraph<'_>, doc: &str) -> Result<()> {
    render_doc_with(w, graph, doc, "para", None)
}

pub(crate) fn render_doc_with(
    w: &mut MarkupWriter,
    graph: &PageGraph<'_>,
    doc: &str,
    para_tag: &str,
    link_attr: Option<&str>,
) -> Result<()> {
    for para in doc.split("\n\n") {
        w.element(para_tag, &[], |w| {
            for segment in segments(para) {
                match segment {
                    Segment::Text(text) => w.text(text)?,
                    Segment::Marker(token) => match link_attr
                        .and_then(|attr| graph.lookup_xref(token).map(|target| (attr, target)))
                    {
                        Some((attr, target)) => w.tag("link", &[(attr, target)], token)?,
                        // Unresolved references degrade to plain text.
                        None => w.text(token)?,
                    },
                }
            }
            Ok(())
        })?;
    }
    Ok(())
}
