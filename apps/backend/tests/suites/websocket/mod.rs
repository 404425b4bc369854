mod lobby_tests;
mod reconnect_tests;
