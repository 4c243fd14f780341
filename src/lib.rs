// ============================================================================
// NOTEGRID - in-memory note board for the terminal
// ============================================================================
//
// MODULE STRUCTURE:
// 1. note      - Note / Draft records, id generation, seed notes
// 2. view      - Derived view: case-insensitive filter + recency sort
// 3. store     - Owned session state and the single command reducer
// 4. app       - Terminal session state (focus, selection, editors, hit areas)
// 5. input     - Keyboard and mouse handling mapped onto commands
// 6. render    - Header, sidebar, note grid, dialog
// 7. config    - Environment configuration
// 8. logging   - File-backed logger
// 9. terminal  - Raw mode / alternate screen with guaranteed restore
// ============================================================================

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod note;
pub mod render;
pub mod store;
pub mod terminal;
pub mod view;

pub use app::{App, Focus};
pub use config::Config;
pub use note::{DialogMode, Draft, Note};
pub use store::{Command, NotesState};
pub use view::visible_notes;
