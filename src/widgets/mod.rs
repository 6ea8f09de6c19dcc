//! Built-in widgets.
//!
//! Leaves: Block, Button, CheckBox, InputField, TextView, ProgressBar, Table,
//! List, TreeView, DropDown. Containers: Form, Flex, Grid, Panels,
//! TabbedPanels, WindowManager. Containers hold child [`NodeId`](crate::dom::NodeId)s
//! plus per-child layout data; children are attached through
//! [`Dom`](crate::dom::Dom).

pub mod block;
pub mod button;
pub mod checkbox;
pub mod dropdown;
pub mod flex;
pub mod form;
pub mod grid;
pub mod input_field;
pub mod list;
pub mod panels;
pub mod progress_bar;
pub mod tabbed_panels;
pub mod table;
pub mod text_view;
pub mod tree_view;
pub mod window_manager;

pub use block::Block;
pub use button::Button;
pub use checkbox::CheckBox;
pub use dropdown::{DropDown, DropDownOption};
pub use flex::{Flex, FlexItem};
pub use form::Form;
pub use grid::{Grid, GridCell};
pub use input_field::{accept_integer, InputField};
pub use list::{List, ListItem};
pub use panels::Panels;
pub use progress_bar::ProgressBar;
pub use tabbed_panels::TabbedPanels;
pub use table::Table;
pub use text_view::TextView;
pub use tree_view::{TreeNode, TreeNodeId, TreeView};
pub use window_manager::WindowManager;
