#![allow(non_snake_case)]
pub mod Examples;
pub mod Utils;
pub mod numerical;
