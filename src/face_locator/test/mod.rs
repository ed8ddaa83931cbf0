mod rustface_test;
