mod overrides_tests;
