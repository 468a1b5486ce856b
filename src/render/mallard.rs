use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::markup::MarkupWriter;
use crate::model::{ClassLike, Library};
use crate::pages::{parent_chain, Page, PageGraph, PageNode};
use crate::render::docbook::render_doc_with;
use crate::render::Language;

const XMLNS: &str = "http://projectmallard.org/1.0/";
const XMLNS_UI: &str = "http://projectmallard.org/experimental/ui/";

/// File extension of every generated output unit.
const PAGE_EXT: &str = "page";

/// Multi-page writer: one self-contained output unit per page, linked
/// through the info block and the cross-reference table.
pub struct MallardWriter {
    language: Language,
}

impl MallardWriter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// `output` names a directory; every page is written as `<id>.page`
    /// inside it. The root unit is `index.page`.
    pub fn write(&self, library: &Library, output: &Path) -> Result<()> {
        let graph = PageGraph::build(library, self.language);
        fs::create_dir_all(output)
            .with_context(|| format!("creating output directory {}", output.display()))?;

        for page in graph.pages() {
            let text = self.render_page(library, &graph, page)?;
            let path = output.join(format!("{}.{PAGE_EXT}", page.id));
            fs::write(&path, text)
                .with_context(|| format!("writing page {}", path.display()))?;
        }
        Ok(())
    }

    /// Render one page to a string.
    pub fn render_page(
        &self,
        library: &Library,
        graph: &PageGraph<'_>,
        page: &Page<'_>,
    ) -> Result<String> {
        let mut w = MarkupWriter::new();
        w.element(
            "page",
            &[
                ("id", page.id.as_str()),
                ("type", page.page_type),
                ("style", page.style),
                ("xmlns", XMLNS),
                ("xmlns:ui", XMLNS_UI),
            ],
            |w| {
                w.element("info", &[], |w| {
                    for link in &page.links {
                        match link.group {
                            Some(group) => w.empty(
                                "link",
                                &[
                                    ("type", link.kind),
                                    ("xref", link.target.as_str()),
                                    ("group", group),
                                ],
                            )?,
                            None => w.empty(
                                "link",
                                &[("type", link.kind), ("xref", link.target.as_str())],
                            )?,
                        }
                    }
                    Ok(())
                })?;
                w.tag("title", &[], &page.title)?;

                if let Some(doc) = page.node.doc() {
                    render_doc_with(w, graph, doc, "p", Some("xref"))?;
                }

                if let Some(class_like) = page.node.class_like() {
                    self.render_hierarchy(w, library, graph, class_like)?;
                }

                for (groups, title) in link_sections(page.style) {
                    // A section for a member kind the page has none of is
                    // omitted, not emitted empty.
                    if !section_has_members(graph, page, groups) {
                        continue;
                    }
                    w.element(
                        "links",
                        &[
                            ("type", "topic"),
                            ("ui:expanded", "yes"),
                            ("groups", groups),
                        ],
                        |w| w.tag("title", &[], title),
                    )?;
                }
                Ok(())
            },
        )?;
        w.into_string()
    }

    /// The inheritance tree: ancestors outermost, the documented type as
    /// the innermost item, each entry cross-linked when a page exists.
    fn render_hierarchy(
        &self,
        w: &mut MarkupWriter,
        library: &Library,
        graph: &PageGraph<'_>,
        leaf: ClassLike<'_>,
    ) -> Result<()> {
        let chain = parent_chain(library, leaf)?;
        let main = &library.namespace().name;

        let mut entries: Vec<(&str, ClassLike<'_>)> = chain
            .iter()
            .map(|entry| (entry.namespace, entry.node))
            .collect();
        entries.push((main.as_str(), leaf));

        w.element("synopsis", &[("ui:expanded", "no")], |w| {
            w.tag("title", &[], "Hierarchy")?;
            w.element("tree", &[], |w| self.render_chain(w, graph, &entries))
        })
    }

    fn render_chain(
        &self,
        w: &mut MarkupWriter,
        graph: &PageGraph<'_>,
        entries: &[(&str, ClassLike<'_>)],
    ) -> Result<()> {
        let Some(((namespace, class_like), rest)) = entries.split_first() else {
            return Ok(());
        };
        w.element("item", &[], |w| {
            let node = match *class_like {
                ClassLike::Class(c) => PageNode::Class(c),
                ClassLike::Interface(i) => PageNode::Interface(i),
            };
            let title = self.language.title(namespace, &node);
            match graph.type_page(namespace, class_like.name()) {
                Some(target) => w.tag("code", &[("xref", target.id.as_str())], &title)?,
                None => w.tag("code", &[], &title)?,
            }
            self.render_chain(w, graph, rest)
        })
    }
}

/// Member-kind groups use the child pages' style tags as group names; the
/// catch-all group is always considered populated.
fn section_has_members(graph: &PageGraph<'_>, page: &Page<'_>, groups: &str) -> bool {
    if groups.starts_with('#') {
        return true;
    }
    page.children
        .iter()
        .any(|&child| graph.page(child).style == groups)
}

/// Related-links sections by page style, in fixed group order. Styles not
/// listed have no links sections.
fn link_sections(style: &str) -> &'static [(&'static str, &'static str)] {
    match style {
        "namespace" => &[
            ("class", "Classes"),
            ("function", "Functions"),
            ("#first #default #last", "Other"),
        ],
        "class" => &[
            ("constructor", "Constructors"),
            ("method", "Methods"),
            ("property", "Properties"),
            ("signal", "Signals"),
            ("#first #default #last", "Other"),
        ],
        "record" => &[
            ("constructor", "Constructors"),
            ("method", "Methods"),
            ("#first #default #last", "Other"),
        ],
        "interface" => &[
            ("method", "Methods"),
            ("property", "Properties"),
            ("signal", "Signals"),
            ("#first #default #last", "Other"),
        ],
        _ => &[],
    }
}
