pub mod approval;
pub mod assignment;
pub mod dashboard;
pub mod document;
pub mod ledger;
pub mod messaging;
pub mod meeting;
pub mod registration;
pub mod site;
pub mod staff;
