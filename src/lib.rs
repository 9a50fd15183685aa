pub mod libtane;
