pub mod json_utils;
