//! Built-in generator handlers
//!
//! | Handler | Target | Output |
//! |---------|--------|--------|
//! | [`Dom4jBuilderSpec`] | server builders | Java reading and writing dom4j elements |
//! | [`As3BuilderSpec`] | client builders | AS3 reading and writing E4X XML |
//! | [`As3Model`] | client entities | AS3 model classes |

mod as3_builder;
mod as3_model;
mod dom4j;

pub use as3_builder::As3BuilderSpec;
pub use as3_model::As3Model;
pub use dom4j::Dom4jBuilderSpec;
