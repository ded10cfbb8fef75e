mod property_partition;
