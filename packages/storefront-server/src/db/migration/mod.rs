pub(crate) mod m00001_create_table_users;
pub(crate) mod m00002_create_table_products;
pub(crate) mod m00003_create_table_orders;
