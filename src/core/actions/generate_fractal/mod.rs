pub mod frame_cache;
pub mod generate_fractal_parallel_rayon;
pub mod ports;
pub mod row_scan;
pub mod symmetry;
