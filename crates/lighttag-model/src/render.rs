//! Text rendering of descriptors.
//!
//! `Display` produces the long form with fully qualified names; the short
//! form keeps only the last path segment of every name:
//!
//! ```text
//! long:  scala.collection.immutable.List[+scala.Int]
//! short: List[+Int]
//! ```

use crate::reference::{
    AbstractReference, Boundaries, FullReference, Lambda, LambdaParameter, NameReference,
    Refinement, RefinementDecl, SymName,
};
use std::fmt::{self, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderStyle {
    Long,
    Short,
}

struct Renderer {
    style: RenderStyle,
}

impl Renderer {
    fn name<W: Write>(&self, name: &SymName, out: &mut W) -> fmt::Result {
        let text = match self.style {
            RenderStyle::Long => name.as_str(),
            RenderStyle::Short => name.short(),
        };
        match name {
            SymName::Literal(value) => write!(out, "\"{value}\""),
            SymName::Term(_) => write!(out, "{text}.type"),
            // lambda placeholders are synthesized names starting with a digit
            SymName::Type(raw) if raw.starts_with(|c: char| c.is_ascii_digit()) => {
                write!(out, "%{raw}")
            }
            SymName::Type(_) => out.write_str(text),
        }
    }

    fn prefix<W: Write>(&self, prefix: Option<&AbstractReference>, out: &mut W) -> fmt::Result {
        if let Some(prefix) = prefix {
            self.reference(prefix, out)?;
            out.write_str("::")?;
        }
        Ok(())
    }

    fn name_reference<W: Write>(&self, name: &NameReference, out: &mut W) -> fmt::Result {
        self.prefix(name.prefix.as_deref(), out)?;
        self.name(&name.name, out)?;
        if let Boundaries::Defined { lower, upper } = &name.boundaries {
            out.write_str("|<")?;
            self.reference(lower, out)?;
            out.write_str("..")?;
            self.reference(upper, out)?;
            out.write_char('>')?;
        }
        Ok(())
    }

    fn full_reference<W: Write>(&self, full: &FullReference, out: &mut W) -> fmt::Result {
        self.prefix(full.prefix.as_deref(), out)?;
        self.name(&full.name, out)?;
        out.write_char('[')?;
        for (idx, param) in full.parameters.iter().enumerate() {
            if idx > 0 {
                out.write_str(", ")?;
            }
            out.write_char(param.variance.marker())?;
            self.reference(&param.reference, out)?;
        }
        out.write_char(']')
    }

    fn lambda<W: Write>(&self, lambda: &Lambda, out: &mut W) -> fmt::Result {
        out.write_str("λ ")?;
        for (idx, LambdaParameter(param)) in lambda.params.iter().enumerate() {
            if idx > 0 {
                out.write_char(',')?;
            }
            write!(out, "%{param}")?;
        }
        out.write_str(" → ")?;
        self.reference(&lambda.body, out)
    }

    fn refinement<W: Write>(&self, refinement: &Refinement, out: &mut W) -> fmt::Result {
        out.write_char('(')?;
        self.reference(&refinement.parent, out)?;
        out.write_str("){")?;
        for (idx, decl) in refinement.decls.iter().enumerate() {
            if idx > 0 {
                out.write_str("; ")?;
            }
            match decl {
                RefinementDecl::Signature {
                    name,
                    params,
                    result,
                } => {
                    write!(out, "def {name}(")?;
                    for (pidx, param) in params.iter().enumerate() {
                        if pidx > 0 {
                            out.write_str(", ")?;
                        }
                        self.reference(param, out)?;
                    }
                    out.write_str("): ")?;
                    self.reference(result, out)?;
                }
                RefinementDecl::TypeMember { name, reference } => {
                    write!(out, "type {name} = ")?;
                    self.reference(reference, out)?;
                }
            }
        }
        out.write_char('}')
    }

    fn reference<W: Write>(&self, reference: &AbstractReference, out: &mut W) -> fmt::Result {
        match reference {
            AbstractReference::Name(name) => self.name_reference(name, out),
            AbstractReference::Full(full) => self.full_reference(full, out),
            AbstractReference::Lambda(lambda) => self.lambda(lambda, out),
            AbstractReference::Intersection(intersection) => {
                out.write_char('{')?;
                for (idx, part) in intersection.parts.iter().enumerate() {
                    if idx > 0 {
                        out.write_str(" & ")?;
                    }
                    self.reference(part, out)?;
                }
                out.write_char('}')
            }
            AbstractReference::Refinement(refinement) => self.refinement(refinement, out),
        }
    }
}

/// Render `reference` in the requested style.
pub fn render(reference: &AbstractReference, style: RenderStyle) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = Renderer { style }.reference(reference, &mut out);
    out
}

impl AbstractReference {
    pub fn long_name(&self) -> String {
        render(self, RenderStyle::Long)
    }

    pub fn short_name(&self) -> String {
        render(self, RenderStyle::Short)
    }
}

impl fmt::Display for AbstractReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer {
            style: RenderStyle::Long,
        }
        .reference(self, f)
    }
}

impl fmt::Display for NameReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer {
            style: RenderStyle::Long,
        }
        .name_reference(self, f)
    }
}

impl fmt::Display for SymName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer {
            style: RenderStyle::Long,
        }
        .name(self, f)
    }
}
