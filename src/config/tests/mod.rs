mod generator_config_tests;
