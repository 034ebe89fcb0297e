mod unit_sqlite_blog_database;
