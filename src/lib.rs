//! Translate XML configuration descriptions into a line-oriented
//! configuration language.
//!
//! The source vocabulary has three top-level elements:
//!
//! ```text
//! <config>
//!     <comment><line>Single line comment</line></comment>
//!     <constant name="num"><value type="integer">10</value></constant>
//!     <expression operation="add">
//!         <operands><operand>num</operand><operand>5</operand></operands>
//!     </expression>
//! </config>
//! ```
//!
//! which translate to
//!
//! ```text
//! \ Single line comment
//! num is 10
//! $+ num 5$
//! ```
//!
//! The translation core lives in [`domain`] and works on a generic
//! [`domain::Node`] tree; [`infrastructure::xml`] builds that tree from XML
//! text and [`application::services::TranslateService`] ties reading,
//! translating and writing together.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{translate, DomainError, Node, Translator};
