mod delay_config_test;
mod delay_key_test;
