// Unit tests for the command-line driver
