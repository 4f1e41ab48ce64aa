//! Active shader variant selection
//!
//! Four shader variants exist for the lifetime of the viewer: a
//! pass-through program and one tessellation program per spacing mode.
//! Each frame the configuration picks one of them; the GPU binding is
//! only touched when that pick changes.

use crate::config::{Configuration, SpacingMode};

/// Number of shader variants
pub const VARIANT_COUNT: usize = 4;

/// Identity of a shader variant. The discriminant is the variant's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantId {
    /// Vertex + fragment only
    PassThrough = 0,
    EqualSpacing = 1,
    OddSpacing = 2,
    EvenSpacing = 3,
}

impl VariantId {
    pub const ALL: [VariantId; VARIANT_COUNT] = [
        VariantId::PassThrough,
        VariantId::EqualSpacing,
        VariantId::OddSpacing,
        VariantId::EvenSpacing,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Spacing mode of a tessellation variant, `None` for pass-through
    pub fn spacing(self) -> Option<SpacingMode> {
        match self {
            VariantId::PassThrough => None,
            VariantId::EqualSpacing => Some(SpacingMode::Equal),
            VariantId::OddSpacing => Some(SpacingMode::Odd),
            VariantId::EvenSpacing => Some(SpacingMode::Even),
        }
    }

    pub fn is_tessellated(self) -> bool {
        self.spacing().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            VariantId::PassThrough => "pass-through",
            VariantId::EqualSpacing => "tess-equal",
            VariantId::OddSpacing => "tess-odd",
            VariantId::EvenSpacing => "tess-even",
        }
    }
}

/// Pick the variant for a configuration.
///
/// Tessellation off always wins; otherwise the spacing mode decides.
pub fn select_variant(config: &Configuration) -> VariantId {
    if !config.tessellation {
        return VariantId::PassThrough;
    }
    match config.spacing {
        SpacingMode::Equal => VariantId::EqualSpacing,
        SpacingMode::Odd => VariantId::OddSpacing,
        SpacingMode::Even => VariantId::EvenSpacing,
    }
}

/// GPU-side effect of making a variant current.
pub trait VariantBinder {
    fn bind(&mut self, variant: VariantId);
}

/// Tracks the bound variant and rebinds only on change.
#[derive(Debug)]
pub struct ActiveShader {
    current: VariantId,
    rebinds: u64,
}

impl ActiveShader {
    /// Bind `initial` and start tracking it
    pub fn new(initial: VariantId, binder: &mut impl VariantBinder) -> Self {
        binder.bind(initial);
        Self {
            current: initial,
            rebinds: 0,
        }
    }

    pub fn current(&self) -> VariantId {
        self.current
    }

    /// Number of rebinds since construction (the initial bind is not counted)
    pub fn rebinds(&self) -> u64 {
        self.rebinds
    }

    /// Re-evaluate the selection for this frame.
    ///
    /// Returns `true` if the binder was called.
    pub fn update(&mut self, config: &Configuration, binder: &mut impl VariantBinder) -> bool {
        let selected = select_variant(config);
        if selected == self.current {
            return false;
        }
        tracing::debug!(
            "Switching shader variant {} -> {}",
            self.current.name(),
            selected.name()
        );
        binder.bind(selected);
        self.current = selected;
        self.rebinds += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingBinder {
        calls: Vec<VariantId>,
    }

    impl VariantBinder for RecordingBinder {
        fn bind(&mut self, variant: VariantId) {
            self.calls.push(variant);
        }
    }

    fn tessellated(spacing: SpacingMode) -> Configuration {
        Configuration {
            tessellation: true,
            spacing,
            ..Default::default()
        }
    }

    #[test]
    fn test_tessellation_off_always_selects_pass_through() {
        for spacing in SpacingMode::ALL {
            let config = Configuration {
                tessellation: false,
                spacing,
                ..Default::default()
            };
            assert_eq!(select_variant(&config), VariantId::PassThrough);
        }
    }

    #[test]
    fn test_tessellation_on_selects_spacing_variant() {
        assert_eq!(
            select_variant(&tessellated(SpacingMode::Equal)),
            VariantId::EqualSpacing
        );
        assert_eq!(
            select_variant(&tessellated(SpacingMode::Odd)),
            VariantId::OddSpacing
        );
        assert_eq!(
            select_variant(&tessellated(SpacingMode::Even)),
            VariantId::EvenSpacing
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        for spacing in SpacingMode::ALL {
            let config = tessellated(spacing);
            let first = select_variant(&config);
            for _ in 0..10 {
                assert_eq!(select_variant(&config), first);
            }
        }
    }

    #[test]
    fn test_variant_slots_and_spacing() {
        for (slot, id) in VariantId::ALL.iter().enumerate() {
            assert_eq!(id.index(), slot);
        }
        assert_eq!(VariantId::PassThrough.spacing(), None);
        assert_eq!(VariantId::OddSpacing.spacing(), Some(SpacingMode::Odd));
        assert!(!VariantId::PassThrough.is_tessellated());
        assert!(VariantId::EvenSpacing.is_tessellated());
    }

    #[test]
    fn test_initial_bind_happens_once() {
        let mut binder = RecordingBinder::default();
        let active = ActiveShader::new(VariantId::PassThrough, &mut binder);
        assert_eq!(binder.calls, vec![VariantId::PassThrough]);
        assert_eq!(active.rebinds(), 0);
    }

    #[test]
    fn test_unchanged_selection_never_rebinds() {
        let mut binder = RecordingBinder::default();
        let mut active = ActiveShader::new(VariantId::PassThrough, &mut binder);
        let config = tessellated(SpacingMode::Odd);

        assert!(active.update(&config, &mut binder));
        for _ in 0..100 {
            assert!(!active.update(&config, &mut binder));
        }

        assert_eq!(binder.calls, vec![VariantId::PassThrough, VariantId::OddSpacing]);
        assert_eq!(active.rebinds(), 1);
    }

    #[test]
    fn test_rebinds_only_on_change() {
        let mut binder = RecordingBinder::default();
        let mut active = ActiveShader::new(VariantId::PassThrough, &mut binder);

        let frames = [
            Configuration::default(),
            tessellated(SpacingMode::Equal),
            tessellated(SpacingMode::Equal),
            tessellated(SpacingMode::Even),
            // Spacing changes while tessellation is off do not matter
            Configuration {
                spacing: SpacingMode::Odd,
                ..Default::default()
            },
            Configuration::default(),
        ];
        for config in &frames {
            active.update(config, &mut binder);
        }

        assert_eq!(
            binder.calls,
            vec![
                VariantId::PassThrough,
                VariantId::EqualSpacing,
                VariantId::EvenSpacing,
                VariantId::PassThrough,
            ]
        );
        assert_eq!(active.current(), VariantId::PassThrough);
        assert_eq!(active.rebinds(), 3);
    }
}
