use default_struct_builder::DefaultBuilder;

use crate::qmap::number::NumberFormat;

/// How property values that span several tokens are glued back together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropertyValueMode {
    /// Compatible with existing map importers: a two-token value is joined
    /// with no space (`"Hello` `there"` reads as `Hellothere`) and each
    /// interior token of a longer value is padded with a space on both sides.
    #[default]
    Legacy,
    /// Tokens are joined with a single space.
    Joined,
}

/// Tunables for [`MapParser`](crate::qmap::MapParser).
///
/// ```
/// use qmap_scene::{NumberFormat, ParserOptions, PropertyValueMode};
///
/// let options = ParserOptions::default()
///     .offset_number_format(NumberFormat::INVARIANT)
///     .property_values(PropertyValueMode::Joined);
/// ```
#[derive(Debug, Clone, Default, DefaultBuilder)]
pub struct ParserOptions {
    /// Read standard-form U and V texture offsets with the invariant number
    /// format like every other number. When unset, those two offsets follow
    /// the host locale's number format.
    pub strict_invariant_parsing: bool,
    /// Locale format used for standard-form texture offsets. `None` reads it
    /// from the environment when the parser is created.
    #[builder(into)]
    pub offset_number_format: Option<NumberFormat>,
    pub property_values: PropertyValueMode,
}

impl ParserOptions {
    pub(crate) fn resolve_offset_format(&self) -> NumberFormat {
        if self.strict_invariant_parsing {
            NumberFormat::INVARIANT
        } else {
            self.offset_number_format.unwrap_or_else(NumberFormat::from_env)
        }
    }
}
