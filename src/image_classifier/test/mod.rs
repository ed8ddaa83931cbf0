mod backend_test;
mod model_handle_test;
