mod listener_tests;
