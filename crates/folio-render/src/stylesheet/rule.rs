//! Minimal CSS rule tree with nested rendering.

/// A CSS rule: a selector, its declarations and nested child rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Rule {
    selector: String,
    declarations: Vec<(String, String)>,
    children: Vec<Rule>,
}

impl Rule {
    pub(crate) fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn declare(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.push((property.into(), value.into()));
    }

    pub(crate) fn nest(&mut self, child: Rule) {
        if !child.is_empty() {
            self.children.push(child);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.children.is_empty()
    }

    /// Renders the rule with two-space indentation; empty rules render as "".
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        if !self.is_empty() {
            self.write(0, &mut out);
        }
        out
    }

    fn write(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(&self.selector);
        out.push_str(" {\n");
        for (property, value) in &self.declarations {
            out.push_str(&indent);
            out.push_str("  ");
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        for child in &self.children {
            child.write(depth + 1, out);
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }
}
