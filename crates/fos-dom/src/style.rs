//! Inline style declarations (`element.style`)
//!
//! Backed by the `style` attribute. Only the subset floating UI needs:
//! set/get/remove a property and px-valued helpers.

/// Parsed `style` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    properties: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name: value; name: value` css text
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in css_text.split(';') {
            if let Some((name, value)) = decl.split_once(':') {
                style.set_property(name, value);
            }
        }
        style
    }

    /// Set a property. An empty value removes it, as in CSSOM.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if name.is_empty() {
            return;
        }
        if value.is_empty() {
            self.remove_property(&name);
            return;
        }
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.properties.push((name, value.to_string())),
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let pos = self.properties.iter().position(|(n, _)| n == name)?;
        Some(self.properties.remove(pos).1)
    }

    /// Set a length in pixels
    pub fn set_px(&mut self, name: &str, value: f64) {
        self.set_property(name, &format!("{value}px"));
    }

    /// Read a pixel length; other units yield `None`
    pub fn px(&self, name: &str) -> Option<f64> {
        self.get_property(name)?
            .strip_suffix("px")?
            .trim()
            .parse()
            .ok()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Serialize back to css text
    pub fn css_text(&self) -> String {
        self.properties
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let style = InlineStyle::parse("left: 10px; top:4.5px ; color: red");
        assert_eq!(style.px("left"), Some(10.0));
        assert_eq!(style.px("top"), Some(4.5));
        assert_eq!(style.px("color"), None);
        assert_eq!(style.css_text(), "left: 10px; top: 4.5px; color: red;");
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = InlineStyle::new();
        style.set_px("max-height", 120.0);
        assert_eq!(style.get_property("max-height"), Some("120px"));

        style.set_property("max-height", "");
        assert!(style.is_empty());
    }
}
