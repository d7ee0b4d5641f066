//! Namespace-aware XML tree for MOP responses.
//!
//! # Design
//! The whole response is read into a small owned tree with `quick_xml`'s
//! `NsReader`, recording for every element whether it belongs to the MOP
//! namespace. Lookups walk slash-separated paths of local names and only
//! ever match MOP elements, so an unrelated default namespace or a foreign
//! prefix cannot be mistaken for protocol data. A missing element is `None`
//! or an empty `Vec`; only malformed documents are errors.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::{MeosError, Result};

/// Namespace of every element the client reads.
pub const MOP_NAMESPACE: &str = "http://www.melin.nu/mop";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    in_mop: bool,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Local name, without prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_mop(&self) -> bool {
        self.in_mop
    }

    /// Value of an unqualified attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First MOP element at `path` below this one, in document order.
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// Every MOP element at `path` below this one, in document order.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let steps: Vec<&str> = path_steps(path).collect();
        if steps.is_empty() {
            return Vec::new();
        }
        let mut level: Vec<&Element> = vec![self];
        for step in steps {
            level = level.into_iter().flat_map(|el| el.mop_children(step)).collect();
        }
        level
    }

    /// Text of the first MOP element at `path`.
    pub fn find_text(&self, path: &str) -> Option<String> {
        self.find(path).map(|el| el.text().to_string())
    }

    fn mop_children<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        self.children
            .iter()
            .filter(|child| child.in_mop && child.name == name)
            .collect()
    }
}

fn path_steps(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|step| !step.is_empty())
}

/// A parsed response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (resolved, event) = reader.read_resolved_event().map_err(MeosError::malformed)?;
            match event {
                Event::Start(start) => {
                    if root.is_some() {
                        return Err(MeosError::malformed("content after the document element"));
                    }
                    stack.push(open_element(&resolved, &start)?);
                }
                Event::Empty(start) => {
                    if root.is_some() {
                        return Err(MeosError::malformed("content after the document element"));
                    }
                    let element = open_element(&resolved, &start)?;
                    close_element(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    // quick-xml has already matched the end name to its start.
                    let element = stack
                        .pop()
                        .ok_or_else(|| MeosError::malformed("unexpected closing tag"))?;
                    close_element(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(MeosError::malformed)?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(data) => {
                    let text = std::str::from_utf8(&data).map_err(MeosError::malformed)?;
                    push_text(&mut stack, text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(MeosError::malformed(format!(
                "unclosed element <{}>",
                stack.last().map(Element::name).unwrap_or_default()
            )));
        }
        root.map(|root| Self { root })
            .ok_or_else(|| MeosError::malformed("document has no root element"))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn open_element(resolved: &ResolveResult<'_>, start: &BytesStart<'_>) -> Result<Element> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(MeosError::malformed)?
        .to_string();
    let in_mop = match resolved {
        ResolveResult::Bound(ns) => ns.0 == MOP_NAMESPACE.as_bytes(),
        ResolveResult::Unbound => false,
        ResolveResult::Unknown(prefix) => {
            return Err(MeosError::malformed(format!(
                "unbound namespace prefix {:?} on <{name}>",
                String::from_utf8_lossy(prefix)
            )))
        }
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(MeosError::malformed)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        // Only unprefixed attributes are addressable.
        if attr.key.prefix().is_some() {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(MeosError::malformed)?
            .to_string();
        let value = attr.unescape_value().map_err(MeosError::malformed)?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        in_mop,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn close_element(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(MeosError::malformed("text outside the document element")),
    }
}
