//! Image widget

use crate::foundation::math::Vec4;
use crate::props::{keys, PropsBase};

/// Image source and tint; loading the pixels is the renderer's job
#[derive(Debug, Clone, PartialEq)]
pub struct UIImage {
    source: String,
    tint: Vec4,
}

impl UIImage {
    /// Untinted image
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            tint: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Source identifier
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tint color
    pub fn tint(&self) -> Vec4 {
        self.tint
    }

    /// Write source and tint into the element's properties
    pub fn apply(&self, props: &mut PropsBase) {
        props.set(keys::IMAGE, self.source.as_str());
        props.set(keys::COLOR, self.tint);
    }

    /// Change the source
    pub fn set_source(&mut self, source: impl Into<String>, props: &mut PropsBase) {
        self.source = source.into();
        self.apply(props);
    }

    /// Change the tint
    pub fn set_tint(&mut self, tint: Vec4, props: &mut PropsBase) {
        self.tint = tint;
        self.apply(props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_writes_source_and_tint() {
        let image = UIImage::new("icons/folder.png");
        let mut props = PropsBase::new();
        image.apply(&mut props);
        assert_eq!(props.get_as::<String>(keys::IMAGE).unwrap(), "icons/folder.png");
        assert_eq!(props.get_as::<Vec4>(keys::COLOR).unwrap(), Vec4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_tint_change_marks_only_color() {
        let mut image = UIImage::new("a.png");
        let mut props = PropsBase::new();
        image.apply(&mut props);
        props.take_changed();

        image.set_tint(Vec4::new(1.0, 0.0, 0.0, 1.0), &mut props);
        let changed = props.take_changed();
        assert_eq!(changed.len(), 1);
        assert!(changed.contains(keys::COLOR));
    }
}
