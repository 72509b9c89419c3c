mod geography_tests;
