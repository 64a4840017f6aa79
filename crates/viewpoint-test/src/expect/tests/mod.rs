mod soft_tests;
