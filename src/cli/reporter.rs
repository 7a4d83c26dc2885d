use colored::Colorize;
use serde::Serialize;

use lighttag_model::{AbstractReference, LightTypeTag, MultiMap, NameReference, RenderStyle, render};

/// One described sample, as emitted by `--format json`.
#[derive(Debug, Serialize)]
pub struct TagReport<'a> {
    pub name: &'a str,
    pub rendered: String,
    pub tag: &'a LightTypeTag,
}

impl<'a> TagReport<'a> {
    pub fn new(name: &'a str, tag: &'a LightTypeTag, style: RenderStyle) -> Self {
        TagReport {
            name,
            rendered: render(&tag.reference, style),
            tag,
        }
    }
}

pub struct Reporter {
    color: bool,
    style: RenderStyle,
}

impl Reporter {
    pub fn new(color: bool, style: RenderStyle) -> Self {
        Reporter { color, style }
    }

    /// Human-readable dump of one tag: the root descriptor followed by both
    /// databases, one edge per line.
    pub fn render_tag(&self, name: &str, tag: &LightTypeTag) -> String {
        let mut out = String::new();
        out.push_str(&self.format_title(name));
        out.push_str(": ");
        out.push_str(&render(&tag.reference, self.style));
        out.push('\n');

        self.push_section(
            &mut out,
            "stable bases",
            &tag.stable_bases,
            |reference| render(reference, self.style),
            |reference| render(reference, self.style),
        );
        self.push_section(
            &mut out,
            "unapplied inheritance",
            &tag.unapplied_inheritance,
            |name| self.format_name(name),
            |name| self.format_name(name),
        );
        out
    }

    fn push_section<K: Ord, V: Ord>(
        &self,
        out: &mut String,
        title: &str,
        edges: &MultiMap<K, V>,
        child: impl Fn(&K) -> String,
        parent: impl Fn(&V) -> String,
    ) {
        let header = format!("  {title} ({}):", edges.edge_count());
        if self.color {
            out.push_str(&header.cyan().to_string());
        } else {
            out.push_str(&header);
        }
        out.push('\n');

        if edges.is_empty() {
            out.push_str("    none\n");
            return;
        }
        let arrow = if self.color {
            "<:".dimmed().to_string()
        } else {
            "<:".to_string()
        };
        for (key, values) in edges.iter() {
            let key = child(key);
            for value in values {
                out.push_str(&format!("    {key} {arrow} {}\n", parent(value)));
            }
        }
    }

    fn format_name(&self, name: &NameReference) -> String {
        render(&AbstractReference::Name(name.clone()), self.style)
    }

    fn format_title(&self, name: &str) -> String {
        if self.color {
            name.bold().to_string()
        } else {
            name.to_string()
        }
    }
}
