//! Minimal HTML scanning for filling `<template>` markup.
//!
//! Only what the versions page needs: locating elements by a small CSS
//! selector subset (tag names, `.class`, `#id`, descendant chains) and
//! editing their content in place. Tag and attribute names are matched
//! case-insensitively; class and id values are case-sensitive.

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Byte offsets of one element inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// Position of the `<` opening the start tag.
    #[allow(dead_code)]
    pub start: usize,
    /// First byte after the start tag.
    pub inner_start: usize,
    /// Position of the `<` opening the end tag.
    pub inner_end: usize,
    /// First byte after the end tag.
    pub end: usize,
    pub void: bool,
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    attrs: Vec<(String, String)>,
    start: usize,
    end: usize,
    self_closing: bool,
}

impl OpenTag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn is_void(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

/// One compound selector such as `tbody`, `.url` or `template#addon-row-tpl`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(s: &str) -> Result<Self, String> {
        let mut compound = Compound::default();
        let mut rest = s;

        let tag_len = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_len > 0 {
            compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
        }
        rest = &rest[tag_len..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['.', '#']).unwrap_or(body.len());
            if len == 0 {
                return Err(format!("Invalid selector '{}'", s));
            }
            let value = body[..len].to_string();
            if marker == '.' {
                compound.classes.push(value);
            } else if compound.id.replace(value).is_some() {
                return Err(format!("Selector '{}' has more than one id", s));
            }
            rest = &body[len..];
        }

        Ok(compound)
    }

    fn matches(&self, tag: &OpenTag) -> bool {
        if let Some(name) = &self.tag {
            if *name != tag.name {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if tag.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let have: Vec<&str> = tag
                .attr("class")
                .unwrap_or("")
                .split_ascii_whitespace()
                .collect();
            if !self.classes.iter().all(|c| have.contains(&c.as_str())) {
                return false;
            }
        }
        true
    }
}

fn parse_selector(selector: &str) -> Result<Vec<Compound>, String> {
    let chain = selector
        .split_ascii_whitespace()
        .map(Compound::parse)
        .collect::<Result<Vec<_>, _>>()?;
    if chain.is_empty() {
        return Err("Empty selector".to_string());
    }
    Ok(chain)
}

/// Escapes text the way `textContent` serializes into markup.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

/// Parses the start tag beginning at `at` (which must hold `<`).
fn parse_open_tag(html: &str, at: usize) -> Option<OpenTag> {
    let bytes = html.as_bytes();
    let mut i = at + 1;
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    let name_start = i;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = html[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => {
                return Some(OpenTag {
                    name,
                    attrs,
                    start: at,
                    end: i + 1,
                    self_closing: false,
                });
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some(OpenTag {
                    name,
                    attrs,
                    start: at,
                    end: i + 2,
                    self_closing: true,
                });
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let attr_name = html[attr_start..i].to_ascii_lowercase();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = String::new();
        if bytes.get(i) == Some(&b'=') {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i)? {
                quote @ (b'"' | b'\'') => {
                    let close = html[i + 1..].find(*quote as char)? + i + 1;
                    value = html[i + 1..close].to_string();
                    i = close + 1;
                }
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>'
                    {
                        i += 1;
                    }
                    value = html[value_start..i].to_string();
                }
            }
        }
        attrs.push((attr_name, value));
    }
}

enum Token {
    Open(OpenTag),
    Close { name: String, start: usize, end: usize },
}

/// Returns the next start or end tag at or after `from`, skipping
/// comments, doctypes and stray `<`.
fn next_token(html: &str, mut from: usize, to: usize) -> Option<Token> {
    while from < to {
        let lt = html[from..to].find('<')? + from;
        let rest = &html[lt..to];

        if rest.starts_with("<!--") {
            from = match rest.find("-->") {
                Some(off) => lt + off + 3,
                None => return None,
            };
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            from = lt + rest.find('>')? + 1;
            continue;
        }
        if let Some(after) = rest.strip_prefix("</") {
            let name_len = after
                .bytes()
                .take_while(|b| is_name_byte(*b))
                .count();
            if name_len > 0 {
                let end = lt + rest.find('>')? + 1;
                return Some(Token::Close {
                    name: after[..name_len].to_ascii_lowercase(),
                    start: lt,
                    end,
                });
            }
            from = lt + 2;
            continue;
        }
        match parse_open_tag(html, lt) {
            Some(tag) if tag.end <= to => return Some(Token::Open(tag)),
            _ => from = lt + 1,
        }
    }
    None
}

/// Elements whose content is text, not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Start tags that imply the end of an open element whose end tag may be
/// omitted. Elements not listed here only end at their own end tag.
fn closed_by_start(open: &str, start: &str) -> bool {
    match open {
        "li" => start == "li",
        "dt" | "dd" => matches!(start, "dt" | "dd"),
        "td" | "th" => matches!(start, "td" | "th" | "tr" | "tbody" | "thead" | "tfoot"),
        "tr" => matches!(start, "tr" | "tbody" | "thead" | "tfoot"),
        "thead" | "tbody" => matches!(start, "tbody" | "tfoot"),
        "option" => matches!(start, "option" | "optgroup"),
        "optgroup" => start == "optgroup",
        "p" => matches!(
            start,
            "address"
                | "article"
                | "aside"
                | "blockquote"
                | "details"
                | "div"
                | "dd"
                | "dl"
                | "dt"
                | "fieldset"
                | "figure"
                | "footer"
                | "form"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "header"
                | "hr"
                | "li"
                | "main"
                | "nav"
                | "ol"
                | "p"
                | "pre"
                | "section"
                | "table"
                | "ul"
        ),
        _ => false,
    }
}

fn has_optional_end(name: &str) -> bool {
    matches!(
        name,
        "li" | "dt" | "dd" | "td" | "th" | "tr" | "thead" | "tbody" | "tfoot" | "option"
            | "optgroup" | "p"
    )
}

/// Position where scanning resumes after `tag`: raw-text content is
/// skipped up to its end tag.
fn resume_after(html: &str, tag: &OpenTag, to: usize) -> usize {
    if tag.self_closing || !RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
        return tag.end;
    }
    let close = format!("</{}", tag.name);
    html[tag.end..to]
        .to_ascii_lowercase()
        .find(&close)
        .map(|off| tag.end + off)
        .unwrap_or(to)
}

/// Resolves the full extent of the element opened by `tag`, looking no
/// further than `to`. Implied end tags are honoured; an element that is
/// never closed extends to `to`.
fn element_for(html: &str, tag: &OpenTag, to: usize) -> Element {
    let ends_at = |inner_end: usize, end: usize| Element {
        start: tag.start,
        inner_start: tag.end,
        inner_end,
        end,
        void: false,
    };

    if tag.is_void() {
        return Element {
            start: tag.start,
            inner_start: tag.end,
            inner_end: tag.end,
            end: tag.end,
            void: true,
        };
    }

    // Elements opened inside `tag` and not yet closed.
    let mut open: Vec<String> = Vec::new();
    let mut pos = resume_after(html, tag, to);
    while let Some(token) = next_token(html, pos, to) {
        match token {
            Token::Open(inner) => {
                while open
                    .last()
                    .is_some_and(|top| closed_by_start(top, &inner.name))
                {
                    open.pop();
                }
                if open.iter().all(|name| has_optional_end(name))
                    && closed_by_start(&tag.name, &inner.name)
                {
                    return ends_at(inner.start, inner.start);
                }
                if !inner.is_void() {
                    open.push(inner.name.clone());
                }
                pos = resume_after(html, &inner, to);
            }
            Token::Close { name, start, end } => {
                if let Some(idx) = open.iter().rposition(|n| *n == name) {
                    open.truncate(idx);
                } else if name == tag.name {
                    return ends_at(start, end);
                } else if has_optional_end(&tag.name) {
                    // An ancestor's end tag closes this element too.
                    return ends_at(start, start);
                }
                pos = end;
            }
        }
    }

    ends_at(to, to)
}

fn query_in(html: &str, from: usize, to: usize, chain: &[Compound]) -> Option<Element> {
    let mut pos = from;
    while let Some(token) = next_token(html, pos, to) {
        match token {
            Token::Open(tag) => {
                let matched = chain[0].matches(&tag);
                if matched {
                    let element = element_for(html, &tag, to);
                    if chain.len() == 1 {
                        return Some(element);
                    }
                    if let Some(found) =
                        query_in(html, element.inner_start, element.inner_end, &chain[1..])
                    {
                        return Some(found);
                    }
                }
                // Template contents are inert: only the template itself is addressable.
                pos = if tag.name == "template" && !matched {
                    element_for(html, &tag, to).end
                } else {
                    resume_after(html, &tag, to)
                };
            }
            Token::Close { end, .. } => pos = end,
        }
    }
    None
}

/// Finds the first element matching `selector` in document order.
pub fn query(html: &str, selector: &str) -> Result<Option<Element>, String> {
    let chain = parse_selector(selector)?;
    Ok(query_in(html, 0, html.len(), &chain))
}

fn require(html: &str, selector: &str) -> Result<Element, String> {
    let element = query(html, selector)?
        .ok_or_else(|| format!("No element matches '{}'", selector))?;
    if element.void {
        return Err(format!("Element '{}' cannot hold content", selector));
    }
    Ok(element)
}

/// Finds the first element whose `id` attribute equals `id` exactly.
pub fn find_by_id(html: &str, id: &str) -> Option<Element> {
    if id.is_empty() {
        return None;
    }
    let by_id = Compound {
        id: Some(id.to_string()),
        ..Compound::default()
    };
    query_in(html, 0, html.len(), std::slice::from_ref(&by_id))
}

/// Returns the markup inside `<template id="{id}">`.
pub fn template_content(html: &str, id: &str) -> Result<String, String> {
    let element = query_in(
        html,
        0,
        html.len(),
        &[Compound {
            tag: Some("template".to_string()),
            id: Some(id.to_string()),
            classes: Vec::new(),
        }],
    )
    .ok_or_else(|| format!("Template '{}' not found", id))?;
    Ok(html[element.inner_start..element.inner_end].to_string())
}

/// Replaces the children of the matched element with escaped `text`.
pub fn set_text_content(html: &mut String, selector: &str, text: &str) -> Result<(), String> {
    replace_children(html, selector, &escape_text(text))
}

/// Replaces the children of the matched element with raw `markup`.
pub fn replace_children(html: &mut String, selector: &str, markup: &str) -> Result<(), String> {
    let element = require(html, selector)?;
    html.replace_range(element.inner_start..element.inner_end, markup);
    Ok(())
}

/// Replaces the children of the element with the given `id`.
pub fn replace_children_by_id(html: &mut String, id: &str, markup: &str) -> Result<(), String> {
    let element = find_by_id(html, id)
        .filter(|el| !el.void)
        .ok_or_else(|| format!("No element with id '{}'", id))?;
    html.replace_range(element.inner_start..element.inner_end, markup);
    Ok(())
}

/// Inserts raw `markup` as the last children of the matched element.
pub fn append_html(html: &mut String, selector: &str, markup: &str) -> Result<(), String> {
    let element = require(html, selector)?;
    html.insert_str(element.inner_end, markup);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_descendant_of_class() {
        let html = r#"<dl><div class="lang"><dt>Lang</dt><dd>old</dd></div>
            <div class="url"><dt>URL</dt><dd></dd></div></dl>"#;
        let el = query(html, ".url dd").unwrap().unwrap();
        assert_eq!(&html[el.start..el.end], "<dd></dd>");
    }

    #[test]
    fn class_matches_any_token() {
        let html = r#"<span class="big title bold">x</span>"#;
        assert!(query(html, ".title").unwrap().is_some());
        assert!(query(html, "span.big.bold").unwrap().is_some());
        assert!(query(html, ".tit").unwrap().is_none());
    }

    #[test]
    fn nested_same_tag_closes_at_matching_end() {
        let html = "<div id=\"main\"><div>inner</div>tail</div><p>after</p>";
        let el = query(html, "#main").unwrap().unwrap();
        assert_eq!(&html[el.inner_start..el.inner_end], "<div>inner</div>tail");
    }

    #[test]
    fn tag_names_ignore_case_and_comments_are_skipped() {
        let html = "<!-- <td class=\"id\">no</td> --><TD CLASS='id'>yes</TD>";
        let el = query(html, "td.id").unwrap().unwrap();
        assert_eq!(&html[el.inner_start..el.inner_end], "yes");
    }

    #[test]
    fn template_contents_are_not_searched() {
        let html = r#"<template id="tpl"><h2 class="title">in</h2></template><h2 class="title">out</h2>"#;
        let el = query(html, ".title").unwrap().unwrap();
        assert_eq!(&html[el.inner_start..el.inner_end], "out");
    }

    #[test]
    fn omitted_end_tags_close_at_next_sibling() {
        let mut row = String::from(r#"<tr><td class="id"><td class="builtin"><td class="updated">"#);
        set_text_content(&mut row, ".id", "a").unwrap();
        set_text_content(&mut row, ".builtin", "1.0").unwrap();
        set_text_content(&mut row, ".updated", "1.1").unwrap();
        assert_eq!(
            row,
            r#"<tr><td class="id">a<td class="builtin">1.0<td class="updated">1.1"#
        );
    }

    #[test]
    fn omitted_end_tags_close_at_parent_end() {
        let html = "<dl><dt>URL<dd>http://x</dl><p>after";
        let el = query(html, "dd").unwrap().unwrap();
        assert_eq!(&html[el.inner_start..el.inner_end], "http://x");

        let html = "<ul><li>one<li><p>two<li>three</ul>";
        let el = query(html, "li li").unwrap();
        assert!(el.is_none());
        let second = query(html, "p").unwrap().unwrap();
        assert_eq!(&html[second.inner_start..second.inner_end], "two");
    }

    #[test]
    fn raw_text_is_not_markup() {
        let html = r#"<script>var s = '<div id="main">x</div>';</script><div id="main">real</div>"#;
        let el = query(html, "#main").unwrap().unwrap();
        assert_eq!(&html[el.inner_start..el.inner_end], "real");

        let html = "<TITLE>a <b> title</Title><b>bold</b>";
        let el = query(html, "b").unwrap().unwrap();
        assert_eq!(&html[el.inner_start..el.inner_end], "bold");
        let title = query(html, "title").unwrap().unwrap();
        assert_eq!(&html[title.inner_start..title.inner_end], "a <b> title");
    }

    #[test]
    fn id_lookup_is_exact() {
        let html = r#"<div id="versions">no</div><div id="versions.list">yes</div>"#;
        let el = find_by_id(html, "versions.list").unwrap();
        assert_eq!(&html[el.inner_start..el.inner_end], "yes");
        assert!(find_by_id(html, "").is_none());

        let mut page = html.to_string();
        replace_children_by_id(&mut page, "versions.list", "ok").unwrap();
        assert!(page.ends_with(r#"<div id="versions.list">ok</div>"#));
        assert!(replace_children_by_id(&mut page, "missing", "x").is_err());
    }

    #[test]
    fn set_text_escapes_markup() {
        let mut html = String::from(r#"<h2 class="title">placeholder</h2>"#);
        set_text_content(&mut html, ".title", "a <b> & c").unwrap();
        assert_eq!(html, r#"<h2 class="title">a &lt;b&gt; &amp; c</h2>"#);
    }

    #[test]
    fn append_keeps_existing_children() {
        let mut html = String::from("<table class=\"addons\"><tbody><tr></tr></tbody></table>");
        append_html(&mut html, ".addons tbody", "<tr>new</tr>").unwrap();
        assert_eq!(
            html,
            "<table class=\"addons\"><tbody><tr></tr><tr>new</tr></tbody></table>"
        );
    }

    #[test]
    fn template_content_is_inner_markup() {
        let html = r#"<template id="addon-row-tpl"><tr><td class="id"></td></tr></template>"#;
        assert_eq!(
            template_content(html, "addon-row-tpl").unwrap(),
            r#"<tr><td class="id"></td></tr>"#
        );
        assert!(template_content(html, "version-info-tpl").is_err());
    }

    #[test]
    fn missing_and_void_targets_are_errors() {
        let mut html = String::from("<p>text</p><br class=\"gap\">");
        let err = set_text_content(&mut html, ".title", "x").unwrap_err();
        assert!(err.contains(".title"));
        assert!(set_text_content(&mut html, ".gap", "x").is_err());
    }

    #[test]
    fn rejects_malformed_selectors() {
        assert!(query("<p></p>", "").is_err());
        assert!(query("<p></p>", "p..x").is_err());
        assert!(query("<p></p>", "#a#b").is_err());
    }
}
