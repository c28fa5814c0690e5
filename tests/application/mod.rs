mod delay_simulator_test;
