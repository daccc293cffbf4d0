//! Configuration section definitions.
//!
//! Each module corresponds to a section in `petrona.toml`:
//!
//! | Module    | TOML Section | Purpose                                |
//! |-----------|--------------|----------------------------------------|
//! | `build`   | `[build]`    | Rendered output directory              |
//! | `content` | `[content]`  | Content root and collection name       |
//! | `nav`     | `[nav]`      | Active/inactive link markers           |
//! | `theme`   | `[theme]`    | Tailwind content globs and font family |

mod build;
mod content;
mod nav;
mod theme;

pub use build::BuildSectionConfig;
pub use content::ContentSectionConfig;
pub use nav::NavSectionConfig;
pub use theme::ThemeSectionConfig;
