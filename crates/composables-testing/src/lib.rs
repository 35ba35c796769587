//! Testing utilities and harness for the composables toolkit

#![allow(non_snake_case)]

pub mod testing;

pub use testing::*;

pub mod prelude {
    pub use crate::testing::*;
}
