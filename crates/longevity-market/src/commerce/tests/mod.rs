mod checkout;
mod common;
mod routing;
