pub mod common;

mod registry_rest;
