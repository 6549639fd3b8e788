//! Builtin relationship strategies.
//!
//! Installed by [`register_all`] in a fixed order. Within each family the more specific payload
//! shape is registered first, because dispatch stops at the first match.
//!
//! | Family | Strategy | Matches | Provider state |
//! |---|---|---|---|
//! | list | [`AssociationListDecoder`] | `{"associatedIdentifiers": [..], "associatedFields": [..]}` | not loaded |
//! | list | [`ArrayLiteralListDecoder`] | any array | loaded |
//! | lazy | [`ReferenceModelDecoder`] | `{"identifiers": [{"name", "value"}], "source": ".."}` | not loaded |
//! | lazy | [`InlineModelDecoder`] | any object, or `null` | loaded |

mod array;
mod association;
mod inline;
mod reference;

pub use array::{ArrayListProvider, ArrayLiteralListDecoder};
pub use association::{AssociatedListProvider, AssociationListDecoder};
pub use inline::{InlineModelDecoder, InlineModelProvider};
pub use reference::{ReferenceModelDecoder, ReferenceModelProvider};

use crate::registry::DecoderRegistry;

/// Registers every builtin strategy in probe order.
pub fn register_all(registry: &DecoderRegistry) {
	registry.register_list_decoder(AssociationListDecoder);
	registry.register_list_decoder(ArrayLiteralListDecoder);
	registry.register_lazy_decoder(ReferenceModelDecoder);
	registry.register_lazy_decoder(InlineModelDecoder);
}
