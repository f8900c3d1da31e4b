//! # TUI Components
//!
//! Stateless components take everything as props and are rebuilt each frame:
//! - `TitleBar`, `TabBar`, `Message`
//! - the tab panels in [`panels`]
//!
//! Stateful components own local state and emit events:
//! - `InputBox`: single-line text field
//! - `MessageList`: scrollable transcript over a persistent `MessageListState`
//!
//! Each file holds the component's state, events, rendering and tests.

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod panels;
pub mod tab_bar;

pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use panels::{DocumentPanel, FormsPanel, LawyerPanel, LivestreamPanel};
pub use tab_bar::{Tab, TabBar};
