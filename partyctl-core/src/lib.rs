pub mod config;
pub mod error;
pub mod member;
pub mod notify;
pub mod selection;
pub mod store;
pub mod view;

pub use config::{PartyConfig, SoundConfig, DEFAULT_ENDPOINT};
pub use error::{PartyError, Result};
pub use member::{MemberId, MemberPatch, PartyMember, MAX_SELECTED_MOVES};
pub use notify::{notifier_from_config, BellNotifier, Notifier, SilentNotifier, SoundNotifier};
pub use selection::MoveSelection;
pub use store::{HttpPartyStore, MemoryPartyStore, PartyStore, StoreRequest};
pub use view::{PartyView, EMPTY_SELECTION_MESSAGE};
