pub mod cli_render;
