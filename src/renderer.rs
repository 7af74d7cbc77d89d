//! The render session: a diff engine plus the color registry and labels every
//! render call reads. Swapping markup is done by handing the session another
//! registry, never through shared global state.

use crate::{
    color::{ColorName, ColorRegistry},
    config::Labels,
    engine::{DiffEngine, MyersEngine},
};

/// Colors required by chars mode.
pub const CHARS_COLORS: [ColorName; 2] = [ColorName::CharsAdded, ColorName::CharsRemoved];

/// Colors required by colorized unified mode.
pub const UNIFIED_COLORS: [ColorName; 4] = [
    ColorName::Added,
    ColorName::Removed,
    ColorName::Header,
    ColorName::Section,
];

/// Renders chars and unified diffs. See [`DiffRenderer::chars`],
/// [`DiffRenderer::unified`] and [`DiffRenderer::unified_no_color`].
#[derive(Clone, Debug)]
pub struct DiffRenderer<E = MyersEngine> {
    pub(crate) engine: E,
    pub(crate) colors: ColorRegistry,
    pub(crate) labels: Labels,
}

impl Default for DiffRenderer<MyersEngine> {
    fn default() -> Self {
        Self::with_engine(MyersEngine)
    }
}

impl DiffRenderer<MyersEngine> {
    /// ANSI colors, default labels, Myers engine.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: DiffEngine> DiffRenderer<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            colors: ColorRegistry::ansi(),
            labels: Labels::default(),
        }
    }

    pub fn with_colors(mut self, colors: ColorRegistry) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ColorRegistry {
        &mut self.colors
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn labels_mut(&mut self) -> &mut Labels {
        &mut self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::DiffRenderer;
    use crate::{
        color::{ColorEntry, ColorName, ColorRegistry},
        config::Labels,
    };

    #[test]
    fn new_session_uses_ansi_and_default_labels() {
        let renderer = DiffRenderer::new();
        assert_eq!(renderer.colors(), &ColorRegistry::ansi());
        assert_eq!(renderer.labels(), &Labels::default());
    }

    #[test]
    fn session_registry_is_isolated() {
        let mut custom = DiffRenderer::new();
        custom
            .colors_mut()
            .insert(ColorName::Added, ColorEntry::new("<g>", "</g>"));
        let fresh = DiffRenderer::new();
        assert_eq!(custom.colors().get(ColorName::Added).unwrap().open, "<g>");
        assert_eq!(
            fresh.colors().get(ColorName::Added).unwrap().open,
            "\x1b[32m"
        );
    }

    #[test]
    fn renderer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiffRenderer>();
    }
}
