mod bearer_tests;
