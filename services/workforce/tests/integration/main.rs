mod helpers;

mod document_test;
mod ledger_test;
mod meeting_test;
mod messaging_test;
mod registration_test;
mod router_test;
