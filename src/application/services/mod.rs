mod delay_simulator;

pub use delay_simulator::DelaySimulator;
