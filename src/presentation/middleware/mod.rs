mod stub_delay;

pub use stub_delay::stub_delay_middleware;
