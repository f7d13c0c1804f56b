// Unit tests for the definition-file parser
